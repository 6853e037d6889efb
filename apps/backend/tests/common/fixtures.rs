//! Test fixtures and factory functions for creating test data.

use quiz_core::Question;

/// The single-question arithmetic quiz.
pub fn one_plus_one() -> Vec<Question> {
    vec![Question::new(
        "1+1?",
        vec!["1".into(), "2".into(), "3".into()],
        1,
    )]
}

/// A quiz with `count` questions whose correct answer is always option 0.
pub fn numbered_questions(count: usize) -> Vec<Question> {
    (0..count)
        .map(|i| {
            Question::new(
                format!("Question {}?", i + 1),
                vec![format!("Right {}", i + 1), format!("Wrong {}", i + 1)],
                0,
            )
        })
        .collect()
}

pub const GIFT_QUIZ: &str = "\
::Q1:: 2+2?{
=4
~3
~5
}

::Q2:: Capital of France?{
~Berlin
=Paris
}
";

pub const YAML_QUIZ: &str = "\
- question: \"What is 2 + 2?\"
  options: [\"3\", \"4\", \"5\"]
  correct: 1
- question: Largest planet?
  options:
    - Jupiter
    - Mars
  correct: 0
";

pub fn login_form(password: &str) -> Vec<(&'static str, String)> {
    vec![("password", password.to_string())]
}

pub fn upload_form(
    title: &str,
    format: &str,
    content: &str,
    timer: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("title", title.to_string()),
        ("format", format.to_string()),
        ("content", content.to_string()),
    ];
    if let Some(timer) = timer {
        form.push(("timer_minutes", timer.to_string()));
    }
    form
}

pub fn answer_form(index: usize, answer: Option<i64>, action: &str) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("question_index", index.to_string()),
        ("action", action.to_string()),
    ];
    if let Some(answer) = answer {
        form.push(("answer", answer.to_string()));
    }
    form
}

pub fn contact_form(name: &str, email: &str, subject: &str, message: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("email", email.to_string()),
        ("subject", subject.to_string()),
        ("message", message.to_string()),
    ]
}
