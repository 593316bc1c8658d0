use crate::codec::{base64_decode, base64_encode};
use crate::error::{Result, ToolError};
use rsa::pkcs1::{
    DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding,
};
use rsa::rand_core::OsRng;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use std::fmt;

/// 選択できるRSAキー長
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaKeySize {
    Bits512,
    Bits1024,
    Bits2048,
    Bits4096,
}

impl RsaKeySize {
    pub const ALL: [RsaKeySize; 4] = [
        RsaKeySize::Bits512,
        RsaKeySize::Bits1024,
        RsaKeySize::Bits2048,
        RsaKeySize::Bits4096,
    ];

    pub fn bits(self) -> usize {
        match self {
            RsaKeySize::Bits512 => 512,
            RsaKeySize::Bits1024 => 1024,
            RsaKeySize::Bits2048 => 2048,
            RsaKeySize::Bits4096 => 4096,
        }
    }
}

impl TryFrom<u32> for RsaKeySize {
    type Error = ToolError;

    fn try_from(bits: u32) -> Result<Self> {
        RsaKeySize::ALL
            .into_iter()
            .find(|size| size.bits() == bits as usize)
            .ok_or(ToolError::UnsupportedKeySize(bits))
    }
}

impl fmt::Display for RsaKeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bit", self.bits())
    }
}

/// PKCS#1 PEM形式のキーペア
#[derive(Clone)]
pub struct RsaKeyPair {
    pub private_pem: String,
    pub public_pem: String,
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("private_pem", &"<redacted>")
            .field("public_pem", &self.public_pem)
            .finish()
    }
}

fn pem_error(e: impl fmt::Display) -> ToolError {
    ToolError::Pem(e.to_string())
}

/// RSAキーペアを生成してPEM（"RSA PRIVATE KEY" / "RSA PUBLIC KEY"）で返す
pub fn generate_keypair(size: RsaKeySize) -> Result<RsaKeyPair> {
    log::debug!("RSAキー生成開始: {size}");
    let start_time = std::time::Instant::now();

    let private_key = RsaPrivateKey::new(&mut OsRng, size.bits())?;
    let public_key = RsaPublicKey::from(&private_key);

    let private_pem = private_key.to_pkcs1_pem(LineEnding::LF).map_err(pem_error)?;
    let public_pem = public_key.to_pkcs1_pem(LineEnding::LF).map_err(pem_error)?;

    log::debug!(
        "RSAキー生成完了 - 処理時間: {:.2}秒",
        start_time.elapsed().as_secs_f64()
    );

    Ok(RsaKeyPair {
        private_pem: private_pem.as_str().to_owned(),
        public_pem,
    })
}

/// 公開鍵（PKCS#1 PEM）でPKCS#1 v1.5暗号化し、Base64で返す
pub fn encrypt(message: &str, public_pem: &str) -> Result<String> {
    if message.is_empty() {
        return Err(ToolError::EmptyInput);
    }
    let public_key = RsaPublicKey::from_pkcs1_pem(public_pem.trim()).map_err(pem_error)?;

    let encrypted = public_key.encrypt(&mut OsRng, Pkcs1v15Encrypt, message.as_bytes())?;
    log::debug!("RSA暗号化完了: {} バイト", encrypted.len());

    Ok(base64_encode(&encrypted))
}

/// Base64の暗号文を秘密鍵（PKCS#1 PEM）で復号
pub fn decrypt(encrypted_message: &str, private_pem: &str) -> Result<String> {
    if encrypted_message.trim().is_empty() {
        return Err(ToolError::EmptyInput);
    }
    let private_key = RsaPrivateKey::from_pkcs1_pem(private_pem.trim()).map_err(pem_error)?;

    let encrypted = base64_decode(encrypted_message)?;
    let decrypted = private_key.decrypt(Pkcs1v15Encrypt, &encrypted)?;
    log::debug!("RSA復号化完了: {} バイト", decrypted.len());

    Ok(String::from_utf8(decrypted)?)
}
