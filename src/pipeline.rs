//! The fetch → aggregate → report pipeline.
//!
//! Runs strictly in sequence: one request, then the aggregations, then the
//! reporters. A failed fetch or an empty result stops before any
//! aggregation and is reported as "no data".

use crate::analysis::{count, summarize};
use crate::client::CatalogClient;
use crate::error::{QuakeError, Result as QuakeResult};
use crate::models::{EventCollection, QueryFilter, Summary};
use crate::report::Reporter;
use anyhow::Result;
use tracing::{info, warn};

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Everything was computed and reported.
    Reported(Summary),
    /// Nothing to report; the reason was shown to the user.
    NoData(String),
}

/// Fetch events with `client` and report them.
pub async fn run(
    client: &CatalogClient,
    filter: &QueryFilter,
    reporter: &mut dyn Reporter,
) -> Result<Outcome> {
    let fetched = client.fetch_events(filter).await;
    report_events(fetched, filter, reporter)
}

/// Report an already fetched result.
///
/// Transport, decode and malformed-record errors are returned as hard
/// failures; a non-success status or zero events become [`Outcome::NoData`].
pub fn report_events(
    fetched: QuakeResult<EventCollection>,
    filter: &QueryFilter,
    reporter: &mut dyn Reporter,
) -> Result<Outcome> {
    let collection = match fetched {
        Ok(collection) => collection,
        Err(e) if e.is_no_data() => {
            warn!("No data: {}", e);
            let reason = e.to_string();
            reporter.no_data(&reason);
            return Ok(Outcome::NoData(reason));
        }
        Err(e) => return Err(e.into()),
    };

    if count(Some(&collection)) == 0 {
        let reason = QuakeError::EmptyCollection.to_string();
        warn!("Catalog returned no events");
        reporter.no_data(&reason);
        return Ok(Outcome::NoData(reason));
    }

    let summary = summarize(&collection, filter)?;
    info!(
        "Summarized {} events over {} years",
        summary.count,
        summary.years.len()
    );

    reporter.summary(&summary)?;
    reporter.number_per_year(&summary)?;
    reporter.average_magnitude_per_year(&summary)?;

    Ok(Outcome::Reported(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{client_for, serve_once};
    use crate::models::{Event, EventProperties};

    const T2001: i64 = 978_307_200_000;
    const T2005: i64 = 1_104_537_600_000;

    /// Records which reporter methods were called.
    #[derive(Default)]
    struct RecordingReporter {
        calls: Vec<String>,
    }

    impl Reporter for RecordingReporter {
        fn summary(&mut self, summary: &Summary) -> Result<()> {
            self.calls.push(format!("summary:{}", summary.count));
            Ok(())
        }

        fn number_per_year(&mut self, summary: &Summary) -> Result<()> {
            self.calls
                .push(format!("number_per_year:{:?}", summary.count_series()));
            Ok(())
        }

        fn average_magnitude_per_year(&mut self, summary: &Summary) -> Result<()> {
            self.calls
                .push(format!("average:{}", summary.average_series().len()));
            Ok(())
        }

        fn no_data(&mut self, reason: &str) {
            self.calls.push(format!("no_data:{}", reason));
        }
    }

    fn scenario() -> EventCollection {
        EventCollection::new(vec![
            Event::new(4.1, T2001, [-2.0, 51.0, 10.0]),
            Event::new(5.8, T2001, [-1.0, 52.0, 5.0]),
            Event::new(3.2, T2005, [0.5, 50.5, 8.0]),
        ])
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut reporter = RecordingReporter::default();

        let outcome =
            report_events(Ok(scenario()), &QueryFilter::default(), &mut reporter).unwrap();

        let summary = match outcome {
            Outcome::Reported(summary) => summary,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(summary.count, 3);
        assert_eq!(summary.strongest.magnitude, 5.8);
        assert_eq!(summary.strongest.location.latitude, 52.0);
        assert_eq!(summary.strongest.location.longitude, -1.0);
        assert_eq!(
            reporter.calls,
            vec![
                "summary:3".to_string(),
                "number_per_year:[(2001, 2.0), (2005, 1.0)]".to_string(),
                "average:2".to_string(),
            ]
        );
    }

    #[test]
    fn test_fetch_failure_skips_aggregation_and_plotting() {
        let mut reporter = RecordingReporter::default();

        let outcome = report_events(
            Err(QuakeError::Fetch { status: 503 }),
            &QueryFilter::default(),
            &mut reporter,
        )
        .unwrap();

        assert!(matches!(outcome, Outcome::NoData(ref reason) if reason.contains("503")));
        assert_eq!(reporter.calls.len(), 1);
        assert!(reporter.calls[0].starts_with("no_data:"));
    }

    #[test]
    fn test_empty_collection_reports_no_data() {
        let mut reporter = RecordingReporter::default();

        let outcome = report_events(
            Ok(EventCollection::default()),
            &QueryFilter::default(),
            &mut reporter,
        )
        .unwrap();

        assert!(matches!(outcome, Outcome::NoData(_)));
        assert_eq!(reporter.calls.len(), 1);
        assert!(reporter.calls[0].starts_with("no_data:"));
    }

    #[test]
    fn test_malformed_record_is_hard_failure() {
        let mut reporter = RecordingReporter::default();
        let mut collection = scenario();
        collection.features.push(Event {
            properties: EventProperties {
                mag: Some(2.0),
                time: None,
            },
            ..Event::default()
        });

        let err = report_events(Ok(collection), &QueryFilter::default(), &mut reporter)
            .unwrap_err();

        assert!(err.to_string().contains("Malformed record #3"));
        assert!(reporter.calls.is_empty());
    }

    #[tokio::test]
    async fn test_run_with_error_status_reports_no_data() {
        let (endpoint, server) = serve_once("500 Internal Server Error", "").await;
        let client = client_for(endpoint);
        let mut reporter = RecordingReporter::default();

        let outcome = run(&client, &QueryFilter::default(), &mut reporter)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::NoData(ref reason) if reason.contains("500")));
        assert_eq!(reporter.calls.len(), 1);
        assert!(reporter.calls[0].starts_with("no_data:"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_run_with_catalog_response_reports_summary() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"properties":{"mag":4.1,"time":978307200000},"geometry":{"coordinates":[-2.0,51.0,10.0]}},
            {"properties":{"mag":5.8,"time":978307200000},"geometry":{"coordinates":[-1.0,52.0,5.0]}},
            {"properties":{"mag":3.2,"time":1104537600000},"geometry":{"coordinates":[0.5,50.5,8.0]}}
        ]}"#;
        let (endpoint, server) = serve_once("200 OK", body).await;
        let client = client_for(endpoint);
        let mut reporter = RecordingReporter::default();

        let outcome = run(&client, &QueryFilter::default(), &mut reporter)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::Reported(ref summary) if summary.count == 3));
        assert_eq!(reporter.calls.len(), 3);
        assert_eq!(reporter.calls[0], "summary:3");
        server.await.unwrap();
    }

    #[test]
    fn test_transport_error_is_hard_failure() {
        let mut reporter = RecordingReporter::default();

        let result = report_events(
            Err(QuakeError::Transport {
                endpoint: "http://localhost:1".to_string(),
                message: "cannot connect to the catalog".to_string(),
            }),
            &QueryFilter::default(),
            &mut reporter,
        );

        assert!(result.is_err());
        assert!(reporter.calls.is_empty());
    }
}
