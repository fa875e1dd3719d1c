//! Person records and the in-memory store
//!
//! The store is the single live collection of a session: insertion order by
//! default, re-sorted by name once it holds more than one entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date;

/// One address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Surname and given name, free text ("Surname Given" convention).
    pub name: String,

    /// Phone number, stored exactly as typed.
    #[serde(rename = "pnumber")]
    pub phone: String,

    /// Birth date, serialized as `DD.MM.YYYY`.
    #[serde(with = "date::serde_dotted")]
    pub birth: NaiveDate,
}

/// Ordered in-memory collection of persons.
#[derive(Debug, Clone, Default)]
pub struct PersonStore {
    people: Vec<Person>,
}

impl PersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a person. Once the list holds more than one entry it is
    /// re-sorted ascending by name (stable, lexicographic on the raw string).
    pub fn add(&mut self, person: Person) {
        self.people.push(person);
        if self.people.len() > 1 {
            self.people.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    /// Current contents in current order.
    pub fn all(&self) -> &[Person] {
        &self.people
    }

    /// Replace the whole list (used by load).
    pub fn replace(&mut self, people: Vec<Person>) {
        self.people = people;
    }

    /// People born in the given two-digit month, preserving list order.
    /// An empty result is a normal outcome, not an error.
    pub fn filter_by_month(&self, month_code: &str) -> Vec<Person> {
        self.people
            .iter()
            .filter(|p| p.birth.format("%m").to_string() == month_code)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
