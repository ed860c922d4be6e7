//! Cliente HTTP para el sitio público de consulta de placas
//!
//! El sitio se trata como una fuente opaca y poco fiable: solo se descarga
//! el HTML crudo. La extracción de campos vive en `analysis`.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;

/// Tamaño máximo aceptado para el HTML de resultado
pub const MAX_MARKUP_BYTES: usize = 2 * 1024 * 1024;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Fuente externa de HTML de consulta
#[async_trait]
pub trait ExternalSourceClient: Send + Sync {
    /// Descargar el HTML de resultado para una placa normalizada
    async fn fetch_raw_markup(&self, plate: &str) -> Result<String>;
}

/// Cliente real contra `resultado.php`
#[derive(Debug, Clone)]
pub struct HttpPlateSourceClient {
    client: Client,
    base_url: String,
    partner_ref: String,
    max_body_bytes: usize,
}

impl HttpPlateSourceClient {
    /// Crear cliente con timeout acotado
    pub fn new(base_url: String, partner_ref: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            partner_ref,
            max_body_bytes: MAX_MARKUP_BYTES,
        })
    }

    /// Cambiar el límite de tamaño del HTML descargado
    pub fn with_body_limit(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn from_config(config: &EnvironmentConfig) -> Result<Self> {
        Self::new(
            config.lookup_source_url.clone(),
            config.lookup_partner_ref.clone(),
            Duration::from_secs(config.lookup_timeout_secs),
        )
    }

    /// URL de resultado para una placa
    pub fn result_url(&self, plate: &str) -> String {
        format!(
            "{}/resultado.php?ref={}&placa={}",
            self.base_url,
            urlencoding::encode(&self.partner_ref),
            urlencoding::encode(plate)
        )
    }
}

#[async_trait]
impl ExternalSourceClient for HttpPlateSourceClient {
    async fn fetch_raw_markup(&self, plate: &str) -> Result<String> {
        let url = self.result_url(plate);
        log::info!("🌐 Consultando fuente externa: {}", url);

        let mut response = self
            .client
            .get(&url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8")
            .header("Accept-Language", "pt-BR,pt;q=0.9,en;q=0.8")
            .header("DNT", "1")
            .header("Connection", "keep-alive")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await?;

        let status = response.status();
        log::info!("📡 Response status: {}", status);

        if !status.is_success() {
            return Err(anyhow!("HTTP error! status: {}", status));
        }

        if let Some(len) = response.content_length() {
            if len > self.max_body_bytes as u64 {
                return Err(anyhow!("Respuesta demasiado grande: {} bytes", len));
            }
        }

        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(anyhow!(
                    "Respuesta demasiado grande: más de {} bytes",
                    self.max_body_bytes
                ));
            }
            body.extend_from_slice(&chunk);
        }

        let html = String::from_utf8_lossy(&body).into_owned();
        log::debug!("📄 HTML recibido: {} bytes", html.len());
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_result_url() {
        let client = HttpPlateSourceClient::new(
            "https://buscaplacas.com.br/".to_string(),
            "nwgpa12".to_string(),
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(
            client.result_url("ABC1234"),
            "https://buscaplacas.com.br/resultado.php?ref=nwgpa12&placa=ABC1234"
        );
    }

    #[tokio::test]
    async fn test_unreachable_source_is_an_error() {
        // Puerto cerrado en localhost: el error debe llegar como Err, sin pánico
        let client = HttpPlateSourceClient::new(
            "http://127.0.0.1:9".to_string(),
            "test".to_string(),
            Duration::from_millis(500),
        )
        .unwrap();
        assert!(client.fetch_raw_markup("ABC1234").await.is_err());
    }

    /// Servidor local de una sola conexión que responde `reply` tras leer la petición
    async fn one_shot_server(reply: Option<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            match reply {
                Some(reply) => {
                    let _ = socket.write_all(reply.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
                // Acepta y nunca responde
                None => tokio::time::sleep(Duration::from_secs(30)).await,
            }
        });

        format!("http://{}", addr)
    }

    fn local_client(base_url: String, timeout: Duration) -> HttpPlateSourceClient {
        HttpPlateSourceClient::new(base_url, "test".to_string(), timeout).unwrap()
    }

    fn http_reply(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn test_success_returns_markup() {
        let base = one_shot_server(Some(http_reply("200 OK", "<td>Marca</td>"))).await;
        let client = local_client(base, Duration::from_secs(5));

        assert_eq!(client.fetch_raw_markup("ABC1234").await.unwrap(), "<td>Marca</td>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let base = one_shot_server(Some(http_reply("503 Service Unavailable", "busy"))).await;
        let client = local_client(base, Duration::from_secs(5));

        let err = client.fetch_raw_markup("ABC1234").await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_silent_source_times_out() {
        let base = one_shot_server(None).await;
        let client = local_client(base, Duration::from_millis(300));

        let started = Instant::now();
        let result = client.fetch_raw_markup("ABC1234").await;

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_oversized_markup_is_an_error() {
        let body = "x".repeat(2048);
        let base = one_shot_server(Some(http_reply("200 OK", &body))).await;
        let client = local_client(base, Duration::from_secs(5)).with_body_limit(1024);

        assert!(client.fetch_raw_markup("ABC1234").await.is_err());
    }
}
