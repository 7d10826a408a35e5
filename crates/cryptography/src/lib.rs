// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Cryptographic primitives consumed by the transaction pipeline:
//! Neo hash combinations and secp256r1 keys.

pub mod ec_point;
pub mod error;
pub mod hash;
pub mod key_pair;

pub use ec_point::ECPoint;
pub use error::{CryptoError, CryptoResult};
pub use key_pair::KeyPair;
