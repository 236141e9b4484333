#[cfg(test)]
mod tests {
    use crate::directive::DirectiveKind;
    use crate::evaluate::{evaluate_condition, evaluate_expression, keeps_body};

    #[test]
    fn test_atomic_match_is_case_insensitive() {
        assert!(evaluate_condition("H5", "h5"));
        assert!(evaluate_condition("h5", "H5"));
        assert!(!evaluate_condition("H5", "mp-weixin"));
    }

    #[test]
    fn test_empty_term_is_false() {
        assert!(!evaluate_condition("", "h5"));
        assert!(!evaluate_condition("   ", "h5"));
    }

    #[test]
    fn test_platform_family_substring_both_directions() {
        assert!(evaluate_condition("WEIXIN", "mp-weixin"));
        assert!(evaluate_condition("MP-WEIXIN", "weixin"));
        assert!(!evaluate_condition("WEIXIN", "app-plus"));
    }

    #[test]
    fn test_negation_inverts_the_match() {
        assert!(!evaluate_condition("!H5", "h5"));
        assert!(evaluate_condition("!H5", "app-plus"));
        // Negation of a family match is also inverted
        assert!(!evaluate_condition("!WEIXIN", "mp-weixin"));
    }

    #[test]
    fn test_or_combination() {
        assert!(evaluate_expression("H5||APP-PLUS", "h5"));
        assert!(evaluate_expression("H5||APP-PLUS", "app-plus"));
        assert!(!evaluate_expression("H5||APP-PLUS", "mp-weixin"));
        // Whitespace around the operator is tolerated
        assert!(evaluate_expression("H5 || APP-PLUS", "app-plus"));
    }

    #[test]
    fn test_and_combination_needs_every_term() {
        // A plain platform cannot satisfy two disjoint tokens
        assert!(!evaluate_expression("H5&&APP-PLUS", "h5"));
        // A compound platform token satisfies both terms via substring matching
        assert!(evaluate_expression("H5&&APP-PLUS", "h5-app-plus"));
    }

    #[test]
    fn test_mixed_operators_dispatch_on_or_first() {
        // "H5&&APP||MP" splits on || into ["H5&&APP", "MP"]; the first term is
        // evaluated as one atom, never as a sub-expression.
        assert!(evaluate_expression("H5&&APP||MP", "mp-weixin"));
        // The atom "H5&&APP" still hits platform "h5" through containment
        assert!(evaluate_expression("H5&&APP||MP", "h5"));
        assert!(!evaluate_expression("H5&&APP||MP", "quickapp"));
    }

    #[test]
    fn test_keep_rule_ifdef() {
        assert!(keeps_body(DirectiveKind::Ifdef, "H5", "h5", false));
        assert!(!keeps_body(DirectiveKind::Ifdef, "H5", "mp-weixin", false));
    }

    #[test]
    fn test_keep_rule_ifndef() {
        assert!(!keeps_body(DirectiveKind::Ifndef, "H5", "h5", false));
        assert!(keeps_body(DirectiveKind::Ifndef, "H5", "mp-weixin", false));
    }

    #[test]
    fn test_test_mode_keeps_test_runner_blocks_unconditionally() {
        assert!(keeps_body(DirectiveKind::Ifdef, "VITEST", "h5", true));
        assert!(keeps_body(DirectiveKind::Ifdef, "TEST", "mp-weixin", true));
        // The override wins even for #ifndef
        assert!(keeps_body(DirectiveKind::Ifndef, "VITEST", "h5", true));
    }

    #[test]
    fn test_test_runner_blocks_follow_normal_rules_outside_test_mode() {
        assert!(!keeps_body(DirectiveKind::Ifdef, "VITEST", "h5", false));
        assert!(keeps_body(DirectiveKind::Ifndef, "VITEST", "h5", false));
    }
}
