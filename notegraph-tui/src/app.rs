//! Screen state machine for the terminal client.
//!
//! Six screens, mirroring the shape of the note graph: the project list,
//! the project-title input, a project's node list, the node-title input,
//! the node-content editor, and the node viewer with link navigation.
//! All graph logic lives in `notegraph-core`; this module only sequences
//! screens and forwards committed input values.

use crate::input::{action_for_key, Action};
use crossterm::event::KeyEvent;
use notegraph_core::{Navigation, Node, NotegraphError, Project, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Projects,
    ProjectTitle,
    Nodes,
    NodeTitle,
    NodeContent,
    NodeViewer,
}

pub struct App {
    store: Store,
    pub nav: Navigation,
    pub screen: Screen,
    pub projects: Vec<Project>,
    pub nodes: Vec<Node>,
    pub project_index: usize,
    pub node_index: usize,
    pub title_input: String,
    pub content_input: String,
    /// Node being edited; `None` while creating a new one.
    draft: Option<Node>,
    current_project: Option<Project>,
    /// A store error captured during an interactive operation. Shown in
    /// place of the normal view until the next input arrives.
    pub error: Option<NotegraphError>,
}

impl App {
    /// Opens the session over an initialized store. The initial project
    /// listing must succeed; there is nothing to show without it.
    pub fn new(store: Store, history_limit: Option<usize>) -> notegraph_core::Result<Self> {
        let projects = store.list_projects()?;
        let nav = match history_limit {
            Some(limit) => Navigation::with_history_limit(limit),
            None => Navigation::new(),
        };
        Ok(Self {
            store,
            nav,
            screen: Screen::Projects,
            projects,
            nodes: Vec::new(),
            project_index: 0,
            node_index: 0,
            title_input: String::new(),
            content_input: String::new(),
            draft: None,
            current_project: None,
            error: None,
        })
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.current_project.as_ref()
    }

    fn text_mode(&self) -> bool {
        matches!(
            self.screen,
            Screen::ProjectTitle | Screen::NodeTitle | Screen::NodeContent
        )
    }

    /// Handles one key event. Returns `true` when the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Any input dismisses the held error and resumes the normal view.
        self.error = None;
        let action = action_for_key(key, self.text_mode());
        match self.screen {
            Screen::Projects => self.handle_projects(action),
            Screen::ProjectTitle => self.handle_project_title(action),
            Screen::Nodes => self.handle_nodes(action),
            Screen::NodeTitle => self.handle_node_title(action),
            Screen::NodeContent => self.handle_node_content(action),
            Screen::NodeViewer => self.handle_node_viewer(action),
        }
    }

    fn handle_projects(&mut self, action: Action) -> bool {
        match action {
            Action::Quit | Action::Cancel => return true,
            Action::Up => {
                self.project_index = self.project_index.saturating_sub(1);
            }
            Action::Down => {
                if self.project_index + 1 < self.projects.len() {
                    self.project_index += 1;
                }
            }
            Action::New => {
                self.title_input.clear();
                self.screen = Screen::ProjectTitle;
            }
            Action::Activate => {
                if let Some(project) = self.projects.get(self.project_index).cloned() {
                    self.current_project = Some(project);
                    self.node_index = 0;
                    self.reload_nodes();
                    self.screen = Screen::Nodes;
                }
            }
            Action::Delete => {
                if let Some(project) = self.projects.get(self.project_index) {
                    let id = project.id;
                    if let Err(e) = self.store.delete_project(id) {
                        self.error = Some(e);
                    } else {
                        self.reload_projects();
                    }
                }
            }
            _ => {}
        }
        false
    }

    fn handle_project_title(&mut self, action: Action) -> bool {
        match action {
            Action::Cancel => self.screen = Screen::Projects,
            Action::SubmitText => {
                if !self.title_input.is_empty() {
                    match self.store.put_project(Project::new(self.title_input.clone())) {
                        Ok(_) => {
                            self.reload_projects();
                            self.screen = Screen::Projects;
                        }
                        Err(e) => self.error = Some(e),
                    }
                }
            }
            Action::Backspace => {
                self.title_input.pop();
            }
            Action::InputChar(c) => self.title_input.push(c),
            Action::Quit => return true,
            _ => {}
        }
        false
    }

    fn handle_nodes(&mut self, action: Action) -> bool {
        match action {
            // 'q' backs out one level here; only ctrl+c force-quits, and it
            // is handled by the event loop before reaching the screens.
            Action::Quit | Action::Cancel => {
                self.current_project = None;
                self.screen = Screen::Projects;
            }
            Action::Up => {
                self.node_index = self.node_index.saturating_sub(1);
            }
            Action::Down => {
                if self.node_index + 1 < self.nodes.len() {
                    self.node_index += 1;
                }
            }
            Action::New => {
                self.draft = None;
                self.title_input.clear();
                self.content_input.clear();
                self.screen = Screen::NodeTitle;
            }
            Action::Activate => {
                if let Some(node) = self.nodes.get(self.node_index).cloned() {
                    self.nav.open(node);
                    self.screen = Screen::NodeViewer;
                }
            }
            Action::Delete => {
                if let Some(node) = self.nodes.get(self.node_index) {
                    let id = node.id;
                    if let Err(e) = self.store.delete_node(id) {
                        self.error = Some(e);
                    } else {
                        self.reload_nodes();
                    }
                }
            }
            _ => {}
        }
        false
    }

    fn handle_node_title(&mut self, action: Action) -> bool {
        match action {
            Action::Cancel => self.screen = Screen::Nodes,
            Action::SubmitText => {
                if !self.title_input.is_empty() {
                    self.screen = Screen::NodeContent;
                }
            }
            Action::Backspace => {
                self.title_input.pop();
            }
            Action::InputChar(c) => self.title_input.push(c),
            Action::Quit => return true,
            _ => {}
        }
        false
    }

    fn handle_node_content(&mut self, action: Action) -> bool {
        match action {
            Action::Cancel => self.screen = Screen::NodeTitle,
            Action::Save => self.save_node(),
            Action::SubmitText => self.content_input.push('\n'),
            Action::Backspace => {
                self.content_input.pop();
            }
            Action::InputChar(c) => self.content_input.push(c),
            Action::Quit => return true,
            _ => {}
        }
        false
    }

    fn handle_node_viewer(&mut self, action: Action) -> bool {
        match action {
            Action::Quit | Action::Cancel => {
                self.nav.close();
                self.reload_nodes();
                self.screen = Screen::Nodes;
            }
            Action::Edit => {
                if let Some(node) = self.nav.current().cloned() {
                    self.title_input = node.title.clone();
                    self.content_input = node.content.clone();
                    self.draft = Some(node);
                    self.nav.close();
                    self.screen = Screen::NodeTitle;
                }
            }
            Action::CycleLink => self.nav.cycle_link(),
            Action::Activate => {
                if let Err(e) = self.nav.follow(&self.store) {
                    self.error = Some(e);
                }
            }
            Action::Back => {
                if let Err(e) = self.nav.back(&self.store) {
                    self.error = Some(e);
                }
            }
            _ => {}
        }
        false
    }

    fn save_node(&mut self) {
        let Some(project_id) = self.current_project.as_ref().map(|p| p.id) else {
            return;
        };
        let node = match self.draft.take() {
            Some(mut draft) => {
                draft.title = self.title_input.clone();
                draft.content = self.content_input.clone();
                draft
            }
            None => Node::new(
                self.title_input.clone(),
                self.content_input.clone(),
                project_id,
            ),
        };
        match self.store.put_node(node) {
            Ok(_) => {
                self.reload_nodes();
                self.screen = Screen::Nodes;
            }
            Err(e) => self.error = Some(e),
        }
    }

    fn reload_projects(&mut self) {
        match self.store.list_projects() {
            Ok(projects) => {
                self.projects = projects;
                if self.project_index >= self.projects.len() {
                    self.project_index = self.projects.len().saturating_sub(1);
                }
            }
            Err(e) => self.error = Some(e),
        }
    }

    fn reload_nodes(&mut self) {
        let Some(project_id) = self.current_project.as_ref().map(|p| p.id) else {
            return;
        };
        match self.store.list_nodes_by_project(project_id) {
            Ok(nodes) => {
                self.nodes = nodes;
                if self.node_index >= self.nodes.len() {
                    self.node_index = self.nodes.len().saturating_sub(1);
                }
            }
            Err(e) => self.error = Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use tempfile::NamedTempFile;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app_with_store() -> (NamedTempFile, App) {
        let temp = NamedTempFile::new().unwrap();
        let store = Store::open(temp.path()).unwrap();
        let app = App::new(store, None).unwrap();
        (temp, app)
    }

    #[test]
    fn test_create_project_via_screens() {
        let (_temp, mut app) = app_with_store();
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.screen, Screen::ProjectTitle);
        type_text(&mut app, "Research");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Projects);
        assert_eq!(app.projects.len(), 1);
        assert_eq!(app.projects[0].name, "Research");
    }

    #[test]
    fn test_create_and_view_node() {
        let (_temp, mut app) = app_with_store();
        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "Research");
        app.handle_key(key(KeyCode::Enter));
        // open the project
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Nodes);
        // new node: title, then content, then ctrl+s
        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "Intro");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::NodeContent);
        type_text(&mut app, "Refer to [[Background]].");
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(app.screen, Screen::Nodes);
        assert_eq!(app.nodes.len(), 1);
        // view it
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::NodeViewer);
        assert_eq!(app.nav.links().len(), 1);
        assert_eq!(app.nav.links()[0].title, "Background");
    }

    #[test]
    fn test_editing_reuses_the_node_id() {
        let (_temp, mut app) = app_with_store();
        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "P");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "Note");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "old");
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        let id = app.nodes[0].id;

        // edit: open viewer, 'e', accept title, replace content
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.screen, Screen::NodeTitle);
        app.handle_key(key(KeyCode::Enter));
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Backspace));
        }
        type_text(&mut app, "new");
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        assert_eq!(app.nodes.len(), 1);
        assert_eq!(app.nodes[0].id, id);
        assert_eq!(app.nodes[0].content, "new");
    }

    #[test]
    fn test_deleting_project_from_list() {
        let (_temp, mut app) = app_with_store();
        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "Doomed");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('d')));
        assert!(app.projects.is_empty());
    }

    #[test]
    fn test_q_backs_out_of_node_list_but_quits_project_list() {
        let (_temp, mut app) = app_with_store();
        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "P");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Nodes);
        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        assert_eq!(app.screen, Screen::Projects);
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }
}
