//! 検出サービスAPI連携

pub mod transfer;
