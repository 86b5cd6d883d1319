#[derive(Debug, thiserror::Error)]
pub enum NamingError {
    #[error("brand `{0}` isn't a valid identifier")]
    InvalidBrand(String),
    #[error("prefixing reserved name `{reserved}` with `{brand}` yields another reserved name")]
    PrefixCollision { brand: String, reserved: &'static str },
    #[error("suffixing reserved name `{reserved}` yields another reserved name")]
    SuffixCollision { reserved: &'static str },
}
