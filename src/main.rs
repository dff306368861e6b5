/*
Author      : Seunghwan Shin
Create date : 2025-11-20
Description : 스키마 변경 이후 Kibana index-pattern 의 field mapping 캐시를 갱신해주는 배치 프로그램

History     : 2025-11-20 Seunghwan Shin       # [v.1.0.0] first create
              2025-12-15 Seunghwan Shin       # [v.1.1.0]
                                                1) 설정파일에 환경변수 치환 기능 추가
                                                2) credential check 결과를 enum 으로 표현하도록 변경
              2026-01-19 Seunghwan Shin       # [v.1.2.0] exit_zero_on_error 설정 추가
*/
mod common;
use common::*;

mod controller;
use controller::run_controller::*;

mod enums;

mod model;
use model::cluster_dto::cluster_config::*;
use model::configs::config::*;

mod repository;
use repository::{es_repository::*, kibana_repository::*};

mod service;
use service::refresh_service::*;

mod traits;

mod utils_modules;
use utils_modules::{io_utils::*, logger_utils::*};

#[derive(Parser, Debug)]
#[command(name = "kibana_pattern_refresh_rust")]
#[command(version, about = "Refresh the Kibana field mappings for every index pattern on the configured clusters")]
struct CliArgs {
    /// Path of the cluster configuration file
    #[arg(default_value = "config.yaml")]
    config: PathBuf,

    /// Debug logging
    #[arg(short = 'd', long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let args: CliArgs = CliArgs::parse();

    /* config 설정 전역 적용 */
    dotenv().ok();

    /* 전역 로거설정 */
    let _logger: LoggerHandle = match set_global_logger(args.debug) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{:?}", e);
            std::process::exit(1);
        }
    };

    info!("Start Kibana index-pattern refresh");

    /* Automation parses the event log, not the exit code: by default the
    process exits 0 whatever happened. */
    let exit_code: i32 = match run(&args).await {
        Ok(()) => 0,
        Err(e) => {
            log_event(
                Level::Error,
                "unexpected_error",
                json!({ "error": format!("{:?}", e) }),
            );

            if exit_zero_on_error() {
                0
            } else {
                1
            }
        }
    };

    std::process::exit(exit_code);
}

#[doc = "The whole pass: load config, wire the per cluster services, hand off to the controller"]
async fn run(args: &CliArgs) -> Result<(), anyhow::Error> {
    if !args.config.is_file() {
        return Err(anyhow!(
            "[main::run] Config file '{}' does not exist or is not a regular file",
            args.config.display()
        ));
    }

    let config: RefreshConfig = read_yaml_from_file(&args.config)?;
    set_exit_policy(config.exit_zero_on_error);

    let clusters: Vec<ClusterConfig> = ClusterConfig::build_cluster_configs(&config)?;

    /*
        Per cluster Dependency Injection(DI)
        Each cluster gets its own repositories; the Elasticsearch client built
        here is the one reused for enumeration after the credential check.
    */
    let mut refresh_services: Vec<Arc<RefreshServiceImpl<EsRepositoryImpl, KibanaRepositoryImpl>>> =
        Vec::new();

    for cluster in clusters {
        let es_repository: Arc<EsRepositoryImpl> = Arc::new(EsRepositoryImpl::new(cluster.es())?);
        let kibana_repository: Arc<KibanaRepositoryImpl> =
            Arc::new(KibanaRepositoryImpl::new(cluster.name(), cluster.kibana())?);

        refresh_services.push(Arc::new(RefreshServiceImpl::new(
            cluster,
            es_repository,
            kibana_repository,
        )));
    }

    let controller: RunController<RefreshServiceImpl<EsRepositoryImpl, KibanaRepositoryImpl>> =
        RunController::new(refresh_services);

    controller.run().await
}
