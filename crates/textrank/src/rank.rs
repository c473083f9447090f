use crate::graph::SimilarityGraph;

const DAMPING: f64 = 0.85;
const ITERATIONS: usize = 10;

/// Propagate importance over the similarity graph, PageRank style.
///
/// Runs a fixed number of synchronous passes; every pass reads only the
/// scores from the previous pass. Sentences whose outgoing similarity sums
/// to zero contribute nothing. Returns one score per sentence, in input
/// order; an empty graph yields an empty vector.
pub fn rank(graph: &SimilarityGraph) -> Vec<f64> {
    let n = graph.len();
    if n == 0 {
        return Vec::new();
    }

    let out_sums: Vec<f64> = (0..n).map(|j| graph.row(j).iter().sum()).collect();

    let mut scores = vec![1.0 / n as f64; n];
    for _ in 0..ITERATIONS {
        let mut next = Vec::with_capacity(n);
        for i in 0..n {
            let mut score = (1.0 - DAMPING) / n as f64;
            for j in 0..n {
                if i != j && out_sums[j] > 0.0 {
                    score += DAMPING * (graph.similarity(j, i) / out_sums[j]) * scores[j];
                }
            }
            next.push(score);
        }
        scores = next;
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use segment::tokenize;
    use std::collections::HashSet;

    fn graph_of(sentences: &[&str]) -> SimilarityGraph {
        let words: Vec<HashSet<String>> = sentences.iter().map(|s| tokenize(s)).collect();
        SimilarityGraph::build(&words)
    }

    #[test]
    fn empty_graph_ranks_to_empty() {
        let graph = SimilarityGraph::build(&[]);
        assert!(rank(&graph).is_empty());
    }

    #[test]
    fn scores_match_input_length_and_are_finite() {
        let graph = graph_of(&[
            "Velocity measures speed with direction",
            "Speed and velocity differ by direction",
            "Acceleration changes velocity over time",
            "Bananas ripen quickly in warm kitchens",
        ]);
        let scores = rank(&graph);

        assert_eq!(scores.len(), 4);
        for score in &scores {
            assert!(score.is_finite());
            assert!(*score >= 0.0);
        }
    }

    #[test]
    fn single_sentence_gets_baseline_score() {
        let graph = graph_of(&["Only one sentence here"]);
        let scores = rank(&graph);
        assert_eq!(scores.len(), 1);
        assert!(scores[0].is_finite());
    }

    #[test]
    fn connected_sentences_outrank_isolated_ones() {
        // Three sentences share vocabulary; the last shares nothing.
        let graph = graph_of(&[
            "Kinetic energy depends on mass and velocity",
            "Velocity and mass determine kinetic energy",
            "Energy of motion is kinetic energy",
            "Baking bread requires patience",
        ]);
        let scores = rank(&graph);

        let isolated = scores[3];
        assert!(scores[0] > isolated);
        assert!(scores[1] > isolated);
        assert!(scores[2] > isolated);
    }

    #[test]
    fn disconnected_graph_keeps_uniform_baseline() {
        let graph = graph_of(&[
            "Photosynthesis uses sunlight",
            "Volcanoes erupt molten rock",
        ]);
        let scores = rank(&graph);
        // No edges, so every pass leaves each sentence at (1-d)/n.
        assert!((scores[0] - scores[1]).abs() < 1e-12);
    }
}
