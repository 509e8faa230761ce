pub mod claims;
pub mod errors;
pub mod issuer;
pub mod key;
pub mod validator;

pub use claims::Claims;
pub use errors::IssueError;
pub use errors::KeyError;
pub use errors::ValidationError;
pub use issuer::Token;
pub use issuer::TokenIssuer;
pub use key::SigningKey;
pub use key::TokenSettings;
pub use validator::TokenValidator;
