//! Evaluation panes settle independently and only for the tracked process

mod common;

use common::{application_error, Harness};
use tenderdesk::api::{Bid, EvaluationCriterion, ProcessOption};
use tenderdesk::handlers::handle_api_response;
use tenderdesk::model::evaluation::weight_is_complete;
use tenderdesk::model::{Pane, Section};
use tenderdesk::services::api::{ApiRequest, ApiResponse, OptionsPurpose};

fn criterion(id: u64, weight: f64) -> EvaluationCriterion {
    EvaluationCriterion {
        id,
        name: format!("Criterion {}", id),
        description: None,
        weight,
        criteria_type: "technical".to_string(),
        max_score: Some(100.0),
    }
}

fn bid(id: u64) -> Bid {
    Bid {
        id,
        process_id: Some(5),
        supplier_id: Some(id),
        bid_amount: Some(1000.0),
        technical_score: None,
        commercial_score: None,
        total_score: None,
        status: "submitted".to_string(),
        supplier_name: Some(format!("Supplier {}", id)),
        process_title: None,
    }
}

fn on_evaluation() -> Harness {
    let mut h = Harness::new();
    h.app.activate(Section::Evaluation);
    h.drain();
    handle_api_response(
        &mut h.app,
        ApiResponse::ProcessOptions {
            purpose: OptionsPurpose::Evaluation,
            result: Ok(vec![
                ProcessOption {
                    id: 5,
                    process_number: "LIC-2025-005".to_string(),
                    title: "Cleaning".to_string(),
                },
                ProcessOption {
                    id: 6,
                    process_number: "LIC-2025-006".to_string(),
                    title: "Catering".to_string(),
                },
            ]),
        },
    );
    h
}

#[test]
fn test_selecting_fetches_three_panes() {
    let mut h = on_evaluation();
    h.app.select_picked_process();
    assert_eq!(
        h.drain(),
        vec![
            ApiRequest::EvaluationCriteria { process_id: 5 },
            ApiRequest::EvaluationBids { process_id: 5 },
            ApiRequest::EvaluationRanking { process_id: 5 },
        ]
    );
    assert!(h.app.model.evaluation.criteria.is_loading());
}

#[test]
fn test_incomplete_weights_are_flagged() {
    let mut h = on_evaluation();
    h.app.select_evaluation_process(5);
    handle_api_response(
        &mut h.app,
        ApiResponse::EvaluationCriteria {
            process_id: 5,
            result: Ok(vec![criterion(1, 60.0), criterion(2, 30.0)]),
        },
    );
    let total = h.app.model.evaluation.total_weight().unwrap();
    assert_eq!(total, 90.0);
    assert!(!weight_is_complete(total));

    handle_api_response(
        &mut h.app,
        ApiResponse::EvaluationCriteria {
            process_id: 5,
            result: Ok(vec![criterion(1, 60.0), criterion(2, 40.0)]),
        },
    );
    assert!(weight_is_complete(h.app.model.evaluation.total_weight().unwrap()));
}

#[test]
fn test_responses_for_another_process_are_discarded() {
    let mut h = on_evaluation();
    h.app.select_evaluation_process(5);
    h.app.select_evaluation_process(6);

    handle_api_response(
        &mut h.app,
        ApiResponse::EvaluationBids {
            process_id: 5,
            result: Ok(vec![bid(1)]),
        },
    );
    assert!(h.app.model.evaluation.bids.is_loading());

    handle_api_response(
        &mut h.app,
        ApiResponse::EvaluationBids {
            process_id: 6,
            result: Ok(vec![bid(2), bid(3)]),
        },
    );
    assert_eq!(h.app.model.evaluation.bids.items().len(), 2);
}

#[test]
fn test_one_failing_pane_leaves_the_others() {
    let mut h = on_evaluation();
    h.app.select_evaluation_process(5);

    handle_api_response(
        &mut h.app,
        ApiResponse::EvaluationCriteria {
            process_id: 5,
            result: Err(application_error(500, "criteria table missing")),
        },
    );
    handle_api_response(
        &mut h.app,
        ApiResponse::EvaluationBids {
            process_id: 5,
            result: Ok(vec![bid(1)]),
        },
    );
    handle_api_response(
        &mut h.app,
        ApiResponse::EvaluationRanking {
            process_id: 5,
            result: Ok(Vec::new()),
        },
    );

    let evaluation = &h.app.model.evaluation;
    assert_eq!(
        evaluation.criteria,
        Pane::Failed("Error: criteria table missing".to_string())
    );
    assert_eq!(evaluation.bids.items().len(), 1);
    assert_eq!(evaluation.ranking, Pane::Ready(Vec::new()));
    assert!(evaluation.is_loaded());
    assert_eq!(evaluation.total_weight(), None);
}

#[test]
fn test_deselect_resets_panes() {
    let mut h = on_evaluation();
    h.app.select_evaluation_process(5);
    h.app.deselect_evaluation_process();
    assert_eq!(h.app.model.evaluation.criteria, Pane::Idle);

    handle_api_response(
        &mut h.app,
        ApiResponse::EvaluationRanking {
            process_id: 5,
            result: Ok(Vec::new()),
        },
    );
    assert_eq!(h.app.model.evaluation.ranking, Pane::Idle);
}

#[test]
fn test_generate_ranking_needs_a_process() {
    let mut h = on_evaluation();
    h.app.generate_ranking();
    assert!(h.drain().is_empty());
    assert_eq!(h.app.model.notices.visible(Section::Evaluation).count(), 1);

    h.app.select_evaluation_process(6);
    h.drain();
    h.app.generate_ranking();
    assert_eq!(h.drain(), vec![ApiRequest::GenerateRanking { process_id: 6 }]);

    handle_api_response(
        &mut h.app,
        ApiResponse::RankingGenerated {
            process_id: 6,
            result: Ok(serde_json::json!({"message": "ok"})),
        },
    );
    assert_eq!(h.drain(), vec![ApiRequest::EvaluationRanking { process_id: 6 }]);
}
