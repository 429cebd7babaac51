use crate::errors::DeviceError;

/// Serial transport behind the addressable LED strip. Implementations
/// shift the pre-encoded symbol buffer out at a fixed clock rate so each
/// byte occupies one protocol bit slot (see [`crate::led::encoder`]).
#[allow(async_fn_in_trait)]
pub trait LedStrip {
    async fn write(&mut self, symbols: &[u8]) -> Result<(), DeviceError>;
}
