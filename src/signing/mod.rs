//! Signing collaborators.
//!
//! The coordinator never does cryptography itself. It hands a descriptor and
//! signing material to a [`ChallengeSigner`] and checks what comes back.
//! - [`SshKeySigner`]: OpenSSH keys (Ed25519, ECDSA P-256, RSA) via ssh-key
//! - [`MockSigner`]: configurable double for tests

pub mod mock;
pub mod openssh;
pub mod traits;

pub use mock::MockSigner;
pub use openssh::SshKeySigner;
pub use traits::{ChallengeSigner, PublicKeyDeriver, SignerError};
