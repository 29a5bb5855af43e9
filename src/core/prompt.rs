//! Oracle prompt construction

use super::precompute::VerifyRequest;

/// Build the natural-language prompt for a verification request.
///
/// Similarity is recomputed from the precomputation so that a proxied
/// request and a direct one produce the same text.
pub fn build_prompt(request: &VerifyRequest) -> String {
    let pre = &request.precomputation;
    let address1 = &request.address1;
    let address2 = &request.address2;
    let normalized1 = &pre.normalized_address1;
    let normalized2 = &pre.normalized_address2;
    let distance = pre.levenshtein_distance;
    let similarity = pre.similarity();

    format!(
        r#"Please analyze the following two addresses and determine if they refer to the exact same physical location.
Consider common abbreviations (e.g., St. for Street, Ave for Avenue, Apt for Apartment, etc.) and formatting differences.

Address 1: "{address1}"
Address 2: "{address2}"

A preliminary analysis was performed with the following results:
- Normalized Address 1 (lowercase, abbreviations expanded, punctuation removed): "{normalized1}"
- Normalized Address 2 (lowercase, abbreviations expanded, punctuation removed): "{normalized2}"
- Levenshtein distance between normalized addresses: {distance} (A lower number means more similar).
- Calculated similarity score: {similarity:.2}%.

Based on both the original addresses and this preliminary analysis, are these addresses the same? Provide your reasoning.

Respond only with the JSON object in the specified schema."#
    )
}
