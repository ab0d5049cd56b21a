//! Scholarship applications submitted through the public form.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Review status of an application. Mirrors the storage CHECK constraint so
/// invalid values never reach the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pendente,
    Aprovado,
    Rejeitado,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pendente => "pendente",
            ApplicationStatus::Aprovado => "aprovado",
            ApplicationStatus::Rejeitado => "rejeitado",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pendente" => Some(ApplicationStatus::Pendente),
            "aprovado" => Some(ApplicationStatus::Aprovado),
            "rejeitado" => Some(ApplicationStatus::Rejeitado),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Genero {
    Masculino,
    Feminino,
    Outro,
}

/// Full application row as stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Application {
    pub id: i64,
    pub nome_completo: String,
    pub email: String,
    pub telefone: String,
    pub data_nascimento: Option<NaiveDate>,
    pub genero: Option<Genero>,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub provincia: Option<String>,
    pub curso: String,
    pub universidade: String,
    pub ano_academico: Option<String>,
    pub media_atual: Option<f64>,
    pub situacao_financeira: Option<String>,
    pub renda_familiar: Option<f64>,
    pub motivacao: Option<String>,
    pub objetivos: Option<String>,
    pub experiencia_academica: Option<String>,
    pub atividades_extracurriculares: Option<String>,
    pub referencias: Option<String>,
    pub status: ApplicationStatus,
    pub data_submissao: NaiveDateTime,
    pub data_atualizacao: NaiveDateTime,
}

/// Public submission payload. The validation middleware has already enforced
/// the required fields and formats by the time this is deserialized.
#[derive(Debug, Deserialize)]
pub struct NewApplication {
    pub nome_completo: String,
    pub email: String,
    pub telefone: String,
    pub data_nascimento: Option<NaiveDate>,
    pub genero: Option<Genero>,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub provincia: Option<String>,
    pub curso: String,
    pub universidade: String,
    pub ano_academico: Option<String>,
    #[serde(default, deserialize_with = "crate::models::lenient_opt_f64")]
    pub media_atual: Option<f64>,
    pub situacao_financeira: Option<String>,
    #[serde(default, deserialize_with = "crate::models::lenient_opt_f64")]
    pub renda_familiar: Option<f64>,
    pub motivacao: Option<String>,
    pub objetivos: Option<String>,
    pub experiencia_academica: Option<String>,
    pub atividades_extracurriculares: Option<String>,
    pub referencias: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serde_uses_lowercase_portuguese() {
        let s: ApplicationStatus = serde_json::from_str("\"aprovado\"").unwrap();
        assert_eq!(s, ApplicationStatus::Aprovado);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"aprovado\"");
    }

    #[test]
    fn status_parse_rejects_unknown_values() {
        assert_eq!(
            ApplicationStatus::parse("pendente"),
            Some(ApplicationStatus::Pendente)
        );
        assert_eq!(ApplicationStatus::parse("foo"), None);
        assert_eq!(ApplicationStatus::parse("APROVADO"), None);
    }

    #[test]
    fn new_application_tolerates_missing_optional_fields() {
        let payload: NewApplication = serde_json::from_str(
            r#"{
                "nome_completo": "Maria dos Santos",
                "email": "maria@example.com",
                "telefone": "923456789",
                "curso": "Medicina",
                "universidade": "UAN"
            }"#,
        )
        .unwrap();
        assert!(payload.genero.is_none());
        assert!(payload.media_atual.is_none());
    }

    #[test]
    fn new_application_coerces_numeric_strings() {
        let payload: NewApplication = serde_json::from_str(
            r#"{
                "nome_completo": "Maria dos Santos",
                "email": "maria@example.com",
                "telefone": "923456789",
                "curso": "Medicina",
                "universidade": "UAN",
                "media_atual": "15.5",
                "renda_familiar": ""
            }"#,
        )
        .unwrap();
        assert_eq!(payload.media_atual, Some(15.5));
        assert_eq!(payload.renda_familiar, None);
    }

    #[test]
    fn genero_rejects_values_outside_the_enumeration() {
        assert!(serde_json::from_str::<Genero>("\"masculino\"").is_ok());
        assert!(serde_json::from_str::<Genero>("\"invalido\"").is_err());
    }
}
