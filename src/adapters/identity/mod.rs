mod cognito;

pub use cognito::CognitoIdentityProvider;
