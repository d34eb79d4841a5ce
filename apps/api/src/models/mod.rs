pub mod artifact;
pub mod credits;

pub use artifact::{
    AssignmentRow, ExamRow, PresentationContent, PresentationRow, Question, QuizRow, SlideContent,
    TeamMember,
};
pub use credits::{CreditAccountRow, CreditTransactionRow, PaymentRequestRow};
