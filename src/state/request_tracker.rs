// ============================================================================
// REQUEST TRACKER - La última petición gana
// ============================================================================
// Cada consulta lleva una generación creciente. Una respuesta de una
// generación anterior se descarta sin renderizar.
// ============================================================================

use crate::models::AvailabilityQuery;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub query: AvailabilityQuery,
}

#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    generation: u64,
    in_flight: Option<RequestTicket>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// None si la misma consulta ya está en curso
    pub fn begin(&mut self, query: &AvailabilityQuery) -> Option<RequestTicket> {
        if let Some(current) = &self.in_flight {
            if &current.query == query {
                return None;
            }
        }
        self.generation += 1;
        let ticket = RequestTicket {
            generation: self.generation,
            query: query.clone(),
        };
        self.in_flight = Some(ticket.clone());
        Some(ticket)
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation
    }

    /// true si la respuesta todavía debe renderizarse
    pub fn finish(&mut self, ticket: &RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Invalida cualquier respuesta pendiente (p.ej. el formulario quedó inválido)
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = None;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn query(day: u32) -> AvailabilityQuery {
        AvailabilityQuery {
            start_date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            move_type_id: 3,
            booking_id: None,
        }
    }

    #[test]
    fn later_request_supersedes_earlier_one() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin(&query(1)).unwrap();
        let second = tracker.begin(&query(2)).unwrap();
        assert!(second.generation > first.generation);

        // la segunda responde primero, la primera llega tarde
        assert!(tracker.finish(&second));
        assert!(!tracker.finish(&first));
        assert!(!tracker.in_flight());
    }

    #[test]
    fn identical_query_in_flight_is_not_reissued() {
        let mut tracker = RequestTracker::new();
        let ticket = tracker.begin(&query(1)).unwrap();
        assert!(tracker.begin(&query(1)).is_none());
        assert!(tracker.finish(&ticket));
        // terminada: se puede volver a lanzar (reintento)
        assert!(tracker.begin(&query(1)).is_some());
    }

    #[test]
    fn invalidate_discards_pending_response() {
        let mut tracker = RequestTracker::new();
        let ticket = tracker.begin(&query(1)).unwrap();
        tracker.invalidate();
        assert!(!tracker.is_current(&ticket));
        assert!(!tracker.finish(&ticket));
    }
}
