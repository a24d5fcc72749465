//! Per-kind counts for a decoded document.

use serde::Serialize;

use crate::model::{Container, ContainerItem, Operation, ProjectItem, Todo};

/// Statistics for a document.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// To-dos at the top level.
    pub todos: usize,
    /// Projects at the top level.
    pub projects: usize,
    /// To-dos inside projects.
    pub project_todos: usize,
    /// Headings inside projects.
    pub headings: usize,
    /// Checklist items across all to-dos.
    pub checklist_items: usize,
    /// Envelopes with `operation: update`, at any depth.
    pub updates: usize,
}

impl Stats {
    /// Walk a document and count every envelope.
    #[must_use]
    pub fn of(doc: &Container) -> Self {
        let mut stats = Self::default();
        for item in doc {
            match item {
                ContainerItem::Todo(todo) => {
                    stats.todos += 1;
                    stats.count_todo(todo);
                }
                ContainerItem::Project(project) => {
                    stats.projects += 1;
                    stats.count_operation(project.operation);
                    for entry in project.items.iter().flatten() {
                        match entry {
                            ProjectItem::Todo(todo) => {
                                stats.project_todos += 1;
                                stats.count_todo(todo);
                            }
                            ProjectItem::Heading(heading) => {
                                stats.headings += 1;
                                stats.count_operation(heading.operation);
                            }
                        }
                    }
                }
            }
        }
        stats
    }

    fn count_todo(&mut self, todo: &Todo) {
        self.count_operation(todo.operation);
        let lists = [
            &todo.checklist_items,
            &todo.prepend_checklist_items,
            &todo.append_checklist_items,
        ];
        for item in lists.into_iter().flatten().flatten() {
            self.checklist_items += 1;
            self.count_operation(item.operation);
        }
    }

    fn count_operation(&mut self, operation: Operation) {
        if operation == Operation::Update {
            self.updates += 1;
        }
    }

    /// Total number of envelopes at any depth.
    #[must_use]
    pub fn total(&self) -> usize {
        self.todos + self.projects + self.project_todos + self.headings + self.checklist_items
    }

    /// Returns true if the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
