//! Read-only student records served behind the auth gate.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub id: u32,
    pub email: String,
    pub name: String,
    pub place: String,
    pub age: u8,
    pub semester: u8,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StudentStore {
    students: Vec<Student>,
}

impl StudentStore {
    pub fn new(students: Vec<Student>) -> Self {
        Self { students }
    }

    /// The bundled sample roster.
    pub fn sample() -> Self {
        fn student(
            id: u32,
            email: &str,
            name: &str,
            place: &str,
            age: u8,
            semester: u8,
            courses: &[&str],
        ) -> Student {
            Student {
                id,
                email: email.to_string(),
                name: name.to_string(),
                place: place.to_string(),
                age,
                semester,
                courses: courses.iter().map(|c| c.to_string()).collect(),
            }
        }

        Self::new(vec![
            student(
                1,
                "nandeesh.m@example.com",
                "Nandeesh M",
                "Shivamogga",
                21,
                4,
                &["Computer Networks", "Operating Systems", "Database Systems", "DSA"],
            ),
            student(
                2,
                "rahul.p@example.com",
                "Rahul Patil",
                "Bengaluru",
                22,
                5,
                &["Software Engineering", "Machine Learning", "Compiler Design", "Web Technologies"],
            ),
            student(
                3,
                "ananya.k@example.com",
                "Ananya Kulkarni",
                "Mysuru",
                20,
                3,
                &["Discrete Mathematics", "Data Structures", "Python Programming", "Computer Architecture"],
            ),
            student(
                4,
                "vikram.r@example.com",
                "Vikram Reddy",
                "Hubballi",
                23,
                6,
                &["Cloud Computing", "Big Data", "Cybersecurity", "Agile Methodologies"],
            ),
            student(
                5,
                "sneha.s@example.com",
                "Sneha Shetty",
                "Mangaluru",
                19,
                2,
                &["Introduction to Programming", "Mathematics-I", "English Communication", "Environmental Studies"],
            ),
        ])
    }

    pub fn all(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_roster() {
        let store = StudentStore::sample();
        assert_eq!(store.len(), 5);
        let ids: Vec<u32> = store.all().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(store.all().iter().all(|s| s.courses.len() == 4));
    }
}
