//! Scholarship offers managed by the admin panel.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ScholarshipStatus {
    Ativo,
    Inativo,
}

impl ScholarshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScholarshipStatus::Ativo => "ativo",
            ScholarshipStatus::Inativo => "inativo",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ativo" => Some(ScholarshipStatus::Ativo),
            "inativo" => Some(ScholarshipStatus::Inativo),
            _ => None,
        }
    }
}

impl Default for ScholarshipStatus {
    fn default() -> Self {
        ScholarshipStatus::Ativo
    }
}

/// Full scholarship row as stored; admin endpoints return this.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Scholarship {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub valor: Option<f64>,
    pub duracao_meses: Option<i64>,
    pub requisitos: Option<String>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    pub vagas_disponiveis: i64,
    pub status: ScholarshipStatus,
    pub created_at: NaiveDateTime,
}

/// Column subset exposed on the public listing; status and bookkeeping
/// fields stay internal.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PublicScholarship {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub valor: Option<f64>,
    pub duracao_meses: Option<i64>,
    pub requisitos: Option<String>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    pub vagas_disponiveis: i64,
}

/// Create/update payload; the validation middleware has already checked the
/// required fields and numeric types.
#[derive(Debug, Deserialize)]
pub struct ScholarshipPayload {
    pub nome: String,
    pub descricao: Option<String>,
    #[serde(deserialize_with = "crate::models::lenient_f64")]
    pub valor: f64,
    #[serde(deserialize_with = "crate::models::lenient_i64")]
    pub duracao_meses: i64,
    pub requisitos: Option<String>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    #[serde(deserialize_with = "crate::models::lenient_i64")]
    pub vagas_disponiveis: i64,
    #[serde(default)]
    pub status: ScholarshipStatus,
}
