//! Categoria Model

use serde::{Deserialize, Serialize};

/// Categoria entity (商品分类)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Categoria {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
}

/// Create categoria payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaCreate {
    pub nome: String,
    pub descricao: Option<String>,
}

/// Update categoria payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaUpdate {
    pub nome: Option<String>,
    pub descricao: Option<String>,
}
