//! One-time passcode endpoints
//!
//! - `POST /api/v1/otp/request` - issue and send a code
//! - `POST /api/v1/otp/verify` - check a submitted code
//! - `GET /api/v1/otp/status` - current guards for an address

pub mod request_code;
pub mod status;
pub mod verify_code;

pub use request_code::request_code;
pub use status::otp_status;
pub use verify_code::verify_code;
