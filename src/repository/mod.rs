pub mod es_repository;
pub mod kibana_repository;
