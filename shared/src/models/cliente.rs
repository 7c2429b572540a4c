//! Cliente Model

use serde::{Deserialize, Serialize};

/// Cliente entity (客户)
///
/// `senha_hash` is stored argon2-hashed and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Cliente {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub senha_hash: String,
    pub telefone: Option<String>,
    pub data_cadastro: i64,
}

/// Create cliente payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteCreate {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub telefone: Option<String>,
}
