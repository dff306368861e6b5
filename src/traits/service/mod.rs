pub mod refresh_service_trait;
