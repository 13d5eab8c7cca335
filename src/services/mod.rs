pub mod authenticator;
pub mod cookies;
pub mod signer;
pub mod sigv4;

pub use authenticator::{
    authenticate, authenticate_event, authenticate_json, COOKIE_NAME, HEADER_NAME,
};
pub use signer::{RandomTokenSource, SignedRedirect, Signer, TokenSource};
pub use sigv4::{AwsCredentials, S3Presigner, SigningError};
