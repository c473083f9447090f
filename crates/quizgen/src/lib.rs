pub mod distractor;
pub mod generator;
pub mod grade;

pub use distractor::{distractors, modify_formula};
pub use generator::{
    create_fill_blank, formula_questions, generate_from_lesson, mcq_from_fact,
};
pub use grade::{grade_fill_blank, grade_mcq};
