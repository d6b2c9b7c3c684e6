pub mod claims;
pub mod errors;
pub mod issuer;
pub mod secret;
pub mod validator;

pub use claims::Claims;
pub use errors::SecretKeyError;
pub use errors::TokenError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use secret::SecretKey;
pub use validator::bearer_token;
pub use validator::TokenValidator;
