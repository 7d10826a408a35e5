// Copyright (C) 2015-2025 The Neo Project.
//
// interop_service.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use neo_cryptography::hash::sha256;

/// Interop services invoked through `SYSCALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteropService {
    SystemContractCall,
    SystemCryptoCheckSig,
    SystemCryptoCheckMultisig,
    SystemIteratorNext,
    SystemIteratorValue,
    SystemRuntimeCheckWitness,
}

impl InteropService {
    pub fn name(self) -> &'static str {
        match self {
            Self::SystemContractCall => "System.Contract.Call",
            Self::SystemCryptoCheckSig => "System.Crypto.CheckSig",
            Self::SystemCryptoCheckMultisig => "System.Crypto.CheckMultisig",
            Self::SystemIteratorNext => "System.Iterator.Next",
            Self::SystemIteratorValue => "System.Iterator.Value",
            Self::SystemRuntimeCheckWitness => "System.Runtime.CheckWitness",
        }
    }

    /// The 4-byte operand of `SYSCALL`: the leading bytes of `sha256(name)`.
    pub fn hash(self) -> [u8; 4] {
        let digest = sha256(self.name().as_bytes());
        [digest[0], digest[1], digest[2], digest[3]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_syscall_hashes() {
        assert_eq!(InteropService::SystemContractCall.hash(), [0x62, 0x7d, 0x5b, 0x52]);
        assert_eq!(InteropService::SystemCryptoCheckSig.hash(), [0x56, 0xe7, 0xb3, 0x27]);
        assert_eq!(InteropService::SystemCryptoCheckMultisig.hash(), [0x9e, 0xd0, 0xdc, 0x3a]);
    }
}
