// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model pricing tables and cost calculation.
//!
//! Prices are USD per 1K tokens:
//!
//! gpt-4o-mini:   input=$0.00015, output=$0.0006
//! gpt-4o:        input=$0.0025,  output=$0.01
//! gpt-3.5-turbo: input=$0.0005,  output=$0.0015

use haven_core::TokenUsage;

/// Per-model pricing in USD per thousand tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

const GPT_4O_MINI: ModelPricing = ModelPricing {
    input_per_1k: 0.00015,
    output_per_1k: 0.0006,
};

const GPT_4O: ModelPricing = ModelPricing {
    input_per_1k: 0.0025,
    output_per_1k: 0.01,
};

const GPT_35_TURBO: ModelPricing = ModelPricing {
    input_per_1k: 0.0005,
    output_per_1k: 0.0015,
};

/// Look up pricing for a model identifier.
///
/// Matches on substrings so dated snapshots ("gpt-4o-2024-08-06") resolve.
/// "gpt-4o-mini" is checked before "gpt-4o". Unknown models fall back to
/// gpt-4o-mini pricing.
pub fn get_pricing(model: &str) -> ModelPricing {
    let lower = model.to_lowercase();

    if lower.contains("gpt-4o-mini") {
        GPT_4O_MINI
    } else if lower.contains("gpt-4o") {
        GPT_4O
    } else if lower.contains("gpt-3.5") {
        GPT_35_TURBO
    } else {
        GPT_4O_MINI
    }
}

/// Cost in USD: (tokens / 1000) * price for input and output.
pub fn calculate_cost(usage: &TokenUsage, pricing: &ModelPricing) -> f64 {
    let input = (usage.prompt_tokens as f64 / 1000.0) * pricing.input_per_1k;
    let output = (usage.completion_tokens as f64 / 1000.0) * pricing.output_per_1k;
    input + output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn mini_is_not_shadowed_by_4o() {
        assert_eq!(get_pricing("gpt-4o-mini"), GPT_4O_MINI);
        assert_eq!(get_pricing("gpt-4o-mini-2024-07-18"), GPT_4O_MINI);
        assert_eq!(get_pricing("gpt-4o-2024-08-06"), GPT_4O);
    }

    #[test]
    fn gpt35_pricing() {
        assert_eq!(get_pricing("GPT-3.5-Turbo"), GPT_35_TURBO);
    }

    #[test]
    fn unknown_model_falls_back_to_mini() {
        assert_eq!(get_pricing("some-local-model"), GPT_4O_MINI);
    }

    #[test]
    fn mini_cost_matches_per_1k_rates() {
        let usage = TokenUsage {
            prompt_tokens: 1000,
            completion_tokens: 500,
        };
        // 1.0 * 0.00015 + 0.5 * 0.0006
        assert!(approx(calculate_cost(&usage, &GPT_4O_MINI), 0.00045));
    }

    #[test]
    fn zero_usage_costs_nothing() {
        assert!(approx(calculate_cost(&TokenUsage::default(), &GPT_4O), 0.0));
    }
}
