use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client as S3Client;
use fare_check::core::ReferenceRepository;
use fare_check::utils::{logger, validation::Validate};
use fare_check::{
    reference_repository, CheckPriceRequest, CheckPriceResponse, FareChecker, LambdaConfig,
    ResponseBody, S3Storage,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: ResponseBody,
}

impl From<CheckPriceResponse> for Response {
    fn from(response: CheckPriceResponse) -> Self {
        Self {
            status_code: response.status.code(),
            body: response.body,
        }
    }
}

/// 支援直接呼叫 (payload 即請求) 與 API Gateway 代理事件 (請求在 body 字串中)
fn parse_request(payload: serde_json::Value) -> fare_check::Result<CheckPriceRequest> {
    match payload.get("body").and_then(|body| body.as_str()) {
        Some(body) => CheckPriceRequest::from_json(body),
        None => CheckPriceRequest::from_value(payload),
    }
}

async fn function_handler<R: ReferenceRepository>(
    checker: &FareChecker<R>,
    event: LambdaEvent<serde_json::Value>,
) -> Result<Response, Error> {
    let response = match parse_request(event.payload) {
        Ok(request) => checker.handle(request).await,
        Err(e) => {
            tracing::info!("Rejected malformed request: {}", e);
            CheckPriceResponse::from(&e)
        }
    };

    tracing::info!("Responding with status {}", response.status.code());
    Ok(Response::from(response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    // 創建AWS配置和S3客戶端
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(Region::new(lambda_config.s3_region.clone()))
        .build();
    let s3_client = S3Client::from_conf(config);

    // 參考資料與快取在冷啟動時建立，之後的呼叫共用
    let storage = S3Storage::new(
        s3_client,
        lambda_config.s3_bucket.clone(),
        lambda_config.s3_prefix.clone(),
    );
    let checker = FareChecker::new(reference_repository(storage, &lambda_config));
    let checker = &checker;

    tracing::info!("Fare check Lambda function ready");
    run(service_fn(move |event| async move {
        function_handler(checker, event).await
    }))
    .await
}
