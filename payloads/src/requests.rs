use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitEmail {
    pub email: String,
}

/// Ask the service to email a one-time passcode to `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOtp {
    pub email: String,
}

/// Confirm ownership of `email` with the passcode that was sent to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtp {
    pub email: String,
    pub otp: String,
}
