//! Concrete rule sets for each validated payload.

use super::FieldRule;

const EMAIL_PATTERN: &str = r"[^\s@]+@[^\s@]+\.[^\s@]+";

/// Public application submission.
pub fn application_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::text("nome_completo")
            .required()
            .min_length(2)
            .max_length(255),
        FieldRule::text("email")
            .required()
            .max_length(255)
            .pattern(EMAIL_PATTERN),
        FieldRule::text("telefone")
            .required()
            .min_length(9)
            .max_length(20),
        FieldRule::text("curso").required().max_length(255),
        FieldRule::text("universidade").required().max_length(255),
    ]
}

/// Admin login credentials.
pub fn login_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::text("username")
            .required()
            .min_length(3)
            .max_length(50),
        FieldRule::text("password").required().min_length(6),
    ]
}

/// Admin-user creation.
pub fn admin_user_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::text("username")
            .required()
            .min_length(3)
            .max_length(50),
        FieldRule::text("password").required().min_length(6),
        FieldRule::text("role"),
    ]
}

/// Scholarship create/update payloads.
pub fn scholarship_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::text("nome").required().min_length(2).max_length(255),
        FieldRule::text("descricao"),
        FieldRule::number("valor").required(),
        FieldRule::number("duracao_meses").required(),
        FieldRule::number("vagas_disponiveis").required(),
    ]
}
