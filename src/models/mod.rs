pub mod course;
pub mod round;
pub mod user;

pub use course::{
    Course, CourseDetail, DatabaseStatus, Hole, ImportResult, NewCourseRequest, NewHole,
    NewTeeBox, TeeBox,
};
pub use round::{NewRoundRequest, RoundCreated, RoundRow, RoundSummary, StatSeries};
pub use user::{AccessToken, LoginForm, RegisterRequest, UserIdentity, UserRecord};
