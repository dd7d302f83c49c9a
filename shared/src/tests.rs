#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use crate::models::{CreatePollRequest, Poll};
    use crate::validation::{validate_poll_request, ValidationError};
    use crate::user_info::{resolve_voter_ip, UNKNOWN_IP};
    use crate::error::{ErrorCode, ErrorResponse};

    fn request(question: &str, options: &[&str]) -> CreatePollRequest {
        CreatePollRequest {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_request_is_kept_as_sent() {
        let (question, options) = validate_poll_request(&request("  Qual fruta? ", &[" Banana", "Maçã ", "Uva"])).unwrap();
        assert_eq!(question, "  Qual fruta? ");
        assert_eq!(options, vec![" Banana", "Maçã ", "Uva"]);
    }

    #[test]
    fn test_single_option_is_allowed() {
        assert!(validate_poll_request(&request("Sim?", &["Sim"])).is_ok());
    }

    #[test]
    fn test_rejects_empty_options() {
        assert_eq!(validate_poll_request(&request("Q", &[])), Err(ValidationError::TooFewOptions));
    }

    #[test]
    fn test_question_is_free_form() {
        assert!(validate_poll_request(&request("", &["A"])).is_ok());
        assert!(validate_poll_request(&request(&"q".repeat(500), &["A"])).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_options() {
        assert_eq!(
            validate_poll_request(&request("Q", &["Azul", "Verde", "Azul"])),
            Err(ValidationError::DuplicateOption("Azul".into()))
        );
        assert!(validate_poll_request(&request("Q", &["Azul", "Azul "])).is_ok());
    }

    #[test]
    fn test_many_options_are_allowed() {
        let many: Vec<String> = (0..50).map(|i| format!("opt{i}")).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        assert!(validate_poll_request(&request("Q", &many)).is_ok());
    }

    #[test]
    fn test_options_are_case_sensitive() {
        assert!(validate_poll_request(&request("Q", &["azul", "Azul"])).is_ok());
    }

    #[test]
    fn test_poll_helpers() {
        let mut poll = Poll::new(7, "Melhor cor?", vec!["Azul".into(), "Verde".into()]);
        assert!(poll.has_option("Azul"));
        assert!(!poll.has_option("Papagaio"));
        assert_eq!(poll.votes_for("Azul"), 0);
        assert_eq!(poll.total_votes(), 0);

        poll.results.insert("Azul".into(), 3);
        poll.results.insert("Verde".into(), 2);
        assert_eq!(poll.votes_for("Azul"), 3);
        assert_eq!(poll.total_votes(), 5);
    }

    #[test]
    fn test_poll_without_results_deserializes() {
        let poll: Poll = serde_json::from_str(r#"{"id":1,"question":"Q","options":["A"]}"#).unwrap();
        assert!(poll.results.is_empty());
    }

    #[test]
    fn test_voter_ip_resolution_order() {
        let remote = Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)));
        assert_eq!(resolve_voter_ip(Some("1.2.3.4"), Some("5.6.7.8"), remote), "1.2.3.4");
        assert_eq!(resolve_voter_ip(None, Some("5.6.7.8, 10.0.0.1"), remote), "5.6.7.8");
        assert_eq!(resolve_voter_ip(Some(" "), None, remote), "10.0.0.9");
        assert_eq!(resolve_voter_ip(None, None, None), UNKNOWN_IP);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::AlreadyVoted.status_code(), 403);
        assert_eq!(ErrorCode::NotFound.status_code(), 404);

        let body = serde_json::to_value(ErrorResponse::new(ErrorCode::InvalidOption, "invalid option", vec![])).unwrap();
        assert_eq!(body["code"], "invalid_option");
        assert_eq!(body["error"], "invalid option");
    }
}
