// Stable error codes attached to failed outcomes.
// Codes never change meaning once published; add new ones instead.

pub mod validation {
    pub const PASSWORD_CONFIRMATION_MISMATCH: &str = "VALIDATION_1001";
}

pub mod authentication {
    pub const INVALID_CREDENTIALS: &str = "AUTH_2001";
    pub const TOKEN_INVALID: &str = "AUTH_2002";
    pub const IDENTITY_NO_LONGER_VALID: &str = "AUTH_2003";
}

pub mod lookup {
    pub const USER_NOT_FOUND: &str = "LOOKUP_3001";
}

pub mod conflict {
    pub const EMAIL_ALREADY_REGISTERED: &str = "CONFLICT_4001";
}

pub mod internal {
    pub const STORE_FAILURE: &str = "INTERNAL_5001";
    pub const PRIMITIVE_FAILURE: &str = "INTERNAL_5002";
}
