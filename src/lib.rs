pub mod codec;
pub mod config;
pub mod error;
pub mod hashing;
pub mod json;
pub mod keypair;
pub mod password;

// 公開API
pub use codec::{base64_decode, base64_encode, decode_to_string};
pub use config::{BcryptConfig, Config, GeneratorConfig, JsonConfig, RsaConfig};
pub use error::{Result, ToolError};
pub use hashing::{hash_password, verify_password};
pub use json::{beautify, minify, repair, repair_with_layout, JsonLayout};
pub use keypair::{
    decrypt as rsa_decrypt, encrypt as rsa_encrypt, generate_keypair, RsaKeyPair, RsaKeySize,
};
pub use password::{
    build_pool, generate_key, generate_many, generate_many_with, list_names, resolve,
    BatchPolicy, ClassSet, StrengthProfile,
};
