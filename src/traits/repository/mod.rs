pub mod es_repository_trait;
pub mod kibana_repository_trait;
