use std::collections::{HashMap, HashSet};

/// Document frequencies plus the pairwise sentence-similarity matrix for one
/// document. Rebuilt per call, never persisted.
pub struct SimilarityGraph {
    word_freq: HashMap<String, usize>,
    matrix: Vec<Vec<f64>>,
}

impl SimilarityGraph {
    /// Build the graph from per-sentence token sets.
    ///
    /// Each word counts once per sentence it appears in, so the frequency
    /// table holds document frequency. The matrix is symmetric with a zero
    /// diagonal; self-similarity is never used.
    pub fn build(sentence_words: &[HashSet<String>]) -> Self {
        let mut word_freq: HashMap<String, usize> = HashMap::new();
        for words in sentence_words {
            for word in words {
                *word_freq.entry(word.clone()).or_insert(0) += 1;
            }
        }

        let n = sentence_words.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let sim = weighted_jaccard(&sentence_words[i], &sentence_words[j], &word_freq);
                matrix[i][j] = sim;
                matrix[j][i] = sim;
            }
        }

        Self { word_freq, matrix }
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn similarity(&self, i: usize, j: usize) -> f64 {
        self.matrix[i][j]
    }

    /// All similarities out of sentence `j`, in sentence order.
    pub fn row(&self, j: usize) -> &[f64] {
        &self.matrix[j]
    }

    pub fn word_frequency(&self, word: &str) -> usize {
        self.word_freq.get(word).copied().unwrap_or(0)
    }
}

/// Jaccard overlap where every shared or total word is weighted by
/// 1/(1+freq), so words common across the document count for less.
fn weighted_jaccard(
    a: &HashSet<String>,
    b: &HashSet<String>,
    word_freq: &HashMap<String, usize>,
) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let weight = |w: &String| 1.0 / (1.0 + word_freq.get(w).copied().unwrap_or(1) as f64);

    let weighted_intersection: f64 = a.intersection(b).map(weight).sum();
    let weighted_union: f64 = a.union(b).map(weight).sum();

    if weighted_union > 0.0 {
        weighted_intersection / weighted_union
    } else {
        0.0
    }
}
