pub mod admin;
pub mod auth;
pub mod course;
pub mod professor;
pub mod student;

pub use admin::{Admin, NewAdminRequest, UpdateAdminRequest};
pub use auth::{LoginRequest, StudentLoginRequest};
pub use course::{Course, CourseWithProfessor, NewCourseRequest, UpdateCourseRequest};
pub use professor::{NewProfessorRequest, Professor, UpdateProfessorRequest};
pub use student::{NewStudentRequest, Student, StudentProfile, UpdateStudentRequest};
