// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio ni toca el DOM, solo hace requests HTTP
// ============================================================================

use std::future::Future;

use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use web_sys::UrlSearchParams;

use crate::config::CONFIG;
use crate::error::WidgetError;
use crate::models::{AvailabilityQuery, AvailabilityResponse, AvailabilityResult, Driver, RosterResponse};

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    roster_url: String,
    availability_url: String,
    timeout_ms: u32,
}

/// Cuerpo de error típico del backend: `{"success": false, "message": "..."}`
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            roster_url: CONFIG.roster_url(),
            availability_url: CONFIG.availability_url(),
            timeout_ms: CONFIG.request_timeout_ms,
        }
    }

    /// Lista completa de transporteurs (antes de filtrar por fechas)
    pub async fn fetch_roster(&self) -> Result<Vec<Driver>, WidgetError> {
        log::info!("🚚 [API] GET {}", self.roster_url);

        let request = Request::get(&self.roster_url).header("Accept", "application/json");
        let roster: RosterResponse = self
            .with_timeout(async move { parse_json(request.send().await?).await })
            .await?;
        let drivers = roster.into_drivers()?;

        log::info!("✅ [API] {} transporteurs chargés", drivers.len());
        Ok(drivers)
    }

    /// Consulta de disponibilidad (form-encoded, como lo espera el backend Flask)
    pub async fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityResult, WidgetError> {
        log::info!(
            "🔍 [API] POST {} ({} → {}, type {}, prestation {:?})",
            self.availability_url,
            query.start_date,
            query.end_date,
            query.move_type_id,
            query.booking_id
        );

        let params = UrlSearchParams::new()?;
        for (key, value) in query.to_form_pairs() {
            params.append(key, &value);
        }

        // fetch pone Content-Type: application/x-www-form-urlencoded a partir de URLSearchParams
        let request = Request::post(&self.availability_url)
            .header("Accept", "application/json")
            .body(params)?;
        let payload: AvailabilityResponse = self
            .with_timeout(async move { parse_json(request.send().await?).await })
            .await?;
        let result = AvailabilityResult::from_response(payload)?;

        log::info!(
            "✅ [API] {} disponibles, {} bientôt disponibles",
            result.available.len(),
            result.soon_available.len()
        );
        Ok(result)
    }

    /// El plazo cubre envío + lectura del cuerpo
    async fn with_timeout<T, F>(&self, exchange: F) -> Result<T, WidgetError>
    where
        F: Future<Output = Result<T, WidgetError>>,
    {
        race_deadline(exchange, TimeoutFuture::new(self.timeout_ms), self.timeout_ms).await
    }
}

/// Carrera entre el intercambio y un plazo; no hay cancelación real,
/// la respuesta tardía simplemente se ignora
async fn race_deadline<T, F, D>(exchange: F, deadline: D, timeout_ms: u32) -> Result<T, WidgetError>
where
    F: Future<Output = Result<T, WidgetError>>,
    D: Future<Output = ()>,
{
    match select(Box::pin(exchange), Box::pin(deadline)).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            log::warn!("⏱️ [API] Timeout après {} ms", timeout_ms);
            Err(WidgetError::Timeout(timeout_ms))
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, WidgetError> {
    if !response.ok() {
        let status = response.status();
        let status_text = response.status_text();
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(|body| body.message)
            .unwrap_or(status_text);
        log::error!("❌ [API] HTTP {}: {}", status, message);
        return Err(WidgetError::Http { status, message });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| WidgetError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use futures::future::{pending, ready};

    use super::*;

    #[test]
    fn stalled_body_read_hits_the_deadline() {
        // Cabeceras recibidas, cuerpo que nunca termina
        let exchange = async {
            let headers_received: Result<(), WidgetError> = Ok(());
            headers_received?;
            pending::<Result<u8, WidgetError>>().await
        };
        let result = block_on(race_deadline(exchange, ready(()), 15_000));
        assert_eq!(result, Err(WidgetError::Timeout(15_000)));
    }

    #[test]
    fn finished_exchange_beats_the_deadline() {
        let result = block_on(race_deadline(ready(Ok(7u8)), pending::<()>(), 15_000));
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn exchange_errors_pass_through_untouched() {
        let failure = WidgetError::Http { status: 503, message: "indisponible".into() };
        let result = block_on(race_deadline(
            ready(Err::<u8, _>(failure.clone())),
            pending::<()>(),
            15_000,
        ));
        assert_eq!(result, Err(failure));
    }
}
