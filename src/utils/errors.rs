//! Sistema de manejo de errores
//!
//! Este módulo define los errores que llegan al cliente HTTP y su
//! conversión a respuestas JSON. Los fallos del sitio externo nunca llegan
//! aquí: el servicio de consulta los absorbe y usa el generador.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::BadRequest(msg) => {
                log::warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Placa é obrigatória".to_string(),
                        message: msg,
                        code: "BAD_REQUEST",
                    },
                )
            }

            // Una placa con formato inválido se trata igual que una no encontrada
            AppError::Validation(e) => {
                log::warn!("Invalid plate: {}", e);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Placa não encontrada".to_string(),
                        message: "The plate does not match ABC1234 or ABC1D23".to_string(),
                        code: "NOT_FOUND",
                    },
                )
            }

            AppError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Erro interno do servidor".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        code: "INTERNAL_ERROR",
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}
