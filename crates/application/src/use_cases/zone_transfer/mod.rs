mod transfer_zone;

pub use transfer_zone::{ZoneTransferUseCase, DEFAULT_AXFR_PORT};
