use bitfield_struct::bitfield;

#[bitfield(u8)]
/// Represents the slave address for the HDC2021 sensor.
/// The address is 7 bits long; the base address is 0x40, and pulling the
/// ADDR pin high selects 0x41 via the `addr_pin` bit.
pub struct SlaveAddress {
    #[bits(1, default = false)]
    pub addr_pin: bool,
    #[bits(7, default = 0x40 >> 1)]
    reserved: u8,
}

mod test {
    #[test]
    fn test_addr() {
        let addr = super::SlaveAddress::default();
        assert_eq!(addr.into_bits(), 0x40);
        assert_eq!(addr.with_addr_pin(true).into_bits(), 0x41);
    }
}
