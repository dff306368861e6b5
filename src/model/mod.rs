pub mod cluster_dto;
pub mod configs;
pub mod kibana_dto;
pub mod monitoring;
