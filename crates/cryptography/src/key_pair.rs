// Copyright (C) 2015-2025 The Neo Project.
//
// key_pair.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::ec_point::ECPoint;
use crate::error::{CryptoError, CryptoResult};
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use rand::rngs::OsRng;
use std::fmt;
use zeroize::Zeroizing;

pub const PRIVATE_KEY_SIZE: usize = 32;
pub const SIGNATURE_SIZE: usize = 64;

/// A secp256r1 key pair able to produce transaction signatures.
#[derive(Clone)]
pub struct KeyPair {
    private_key: Zeroizing<[u8; PRIVATE_KEY_SIZE]>,
    public_key: ECPoint,
}

impl KeyPair {
    pub fn from_private_key(bytes: &[u8]) -> CryptoResult<Self> {
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self::from_signing_key(&signing_key))
    }

    pub fn generate() -> Self {
        Self::from_signing_key(&SigningKey::random(&mut OsRng))
    }

    fn from_signing_key(signing_key: &SigningKey) -> Self {
        let mut private_key = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        private_key.copy_from_slice(&signing_key.to_bytes());
        let public_key = ECPoint::from_public_key(&p256::PublicKey::from(*signing_key.verifying_key()));
        Self {
            private_key,
            public_key,
        }
    }

    pub fn public_key(&self) -> &ECPoint {
        &self.public_key
    }

    pub fn private_key(&self) -> &[u8] {
        self.private_key.as_slice()
    }

    /// Deterministic (RFC 6979) ECDSA over `sha256(message)`, as `r || s`.
    pub fn sign(&self, message: &[u8]) -> CryptoResult<[u8; SIGNATURE_SIZE]> {
        let signing_key =
            SigningKey::from_slice(self.private_key.as_slice()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        let signature: Signature = signing_key.sign(message);
        let mut out = [0u8; SIGNATURE_SIZE];
        out.copy_from_slice(&signature.to_bytes());
        Ok(out)
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for KeyPair {}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"***")
            .finish()
    }
}
