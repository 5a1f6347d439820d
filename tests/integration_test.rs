use phase_predict_submit::browser::open_session;
use phase_predict_submit::infrastructure::FormSession;
use phase_predict_submit::models::parse_fasta;
use phase_predict_submit::services::CsvResultSink;
use phase_predict_submit::utils::logging;
use phase_predict_submit::{Config, SubmissionFlow, SubmissionPipeline};
use tokio_test::assert_ok;

const SAMPLE: &str = "\
>UniRef50_P04637 Cellular tumor antigen p53 n=1 RepID=P53_HUMAN
MEEPQSDPSVEPPLSQETFSDLWKLLPENNVLSPLPSQAMDDLMLSPDDIEQWFTEDPGP
DEAPRMPEAAPPVAPAPAAPTPAAPAPAPSWPLSSSVPSQKTYQGSYGFRLGFLHSGTAK
";

#[tokio::test]
#[ignore] // 默认忽略，需要本机浏览器和网络：cargo test -- --ignored
async fn test_predict_single_sequence() {
    logging::init();

    let config = Config::load().unwrap();
    let session = open_session(&config).await.expect("打开浏览器会话失败");

    let records = parse_fasta(SAMPLE);
    let mut sink = CsvResultSink::new(Vec::new(), Vec::new()).unwrap();

    let stats = SubmissionPipeline::new(session, SubmissionFlow::new(&config))
        .run_to_completion(&records, &mut sink)
        .await
        .expect("预测流程失败");

    assert_eq!(stats.total, 1);
    let (success, _) = sink.into_inner().unwrap();
    let success = String::from_utf8(success).unwrap();
    println!("{}", success);
    assert!(success.contains("P53_HUMAN"));
}

#[tokio::test]
#[ignore]
async fn test_open_and_close_session() {
    logging::init();

    let config = Config::load().unwrap();
    let mut session = assert_ok!(open_session(&config).await);
    assert_ok!(session.close().await);
}
