//! A headless editing session, driven one line of text at a time.

use mathanim_core::{
    color::{Color, ColorParseError},
    history::History,
    state::{Location, PropertyKind, Scene},
    AnimObjId,
};

pub const HELP: &str = "\
commands:
  add <name> [parent]          create an object, at the top level or under parent
  fill <id> <#rrggbb[aa]>      set an object's fill color
  stroke <id> <#rrggbb[aa]>    set an object's stroke color
  cascade <id> <fill|stroke>   copy a color from an object onto all of its descendants
  undo [n]                     undo the last n edits (default 1)
  redo [n]                     redo the last n undone edits (default 1)
  remove <id>                  delete an object and its descendants (not undoable)
  list                         show every object
  help                         show this message
  quit                         end the session";

#[derive(Clone, Debug, PartialEq)]
pub enum SessionCommand {
    Add {
        name: String,
        parent: Option<AnimObjId>,
    },
    SetColor {
        target: AnimObjId,
        kind: PropertyKind,
        to: Color,
    },
    Cascade {
        root: AnimObjId,
        kind: PropertyKind,
    },
    Undo(usize),
    Redo(usize),
    Remove(AnimObjId),
    List,
    Help,
    Quit,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command {:?}, try `help`", .0)]
    UnknownCommand(String),
    #[error("missing argument <{}>", .0)]
    MissingArgument(&'static str),
    #[error("unexpected argument {:?}", .0)]
    UnexpectedArgument(String),
    #[error("bad object id {:?}", .0)]
    BadId(String),
    #[error("bad color: {}", .0)]
    BadColor(#[from] ColorParseError),
    #[error("bad property {:?}, expected fill or stroke", .0)]
    BadProperty(String),
    #[error("bad count {:?}", .0)]
    BadCount(String),
}

struct Args<'a> {
    words: std::str::SplitWhitespace<'a>,
}
impl<'a> Args<'a> {
    fn next(&mut self, name: &'static str) -> Result<&'a str, ParseError> {
        self.words.next().ok_or(ParseError::MissingArgument(name))
    }
    fn id(&mut self, name: &'static str) -> Result<AnimObjId, ParseError> {
        let word = self.next(name)?;
        word.parse().map_err(|_| ParseError::BadId(word.to_owned()))
    }
    fn optional_id(&mut self) -> Result<Option<AnimObjId>, ParseError> {
        self.words
            .next()
            .map(|word| word.parse().map_err(|_| ParseError::BadId(word.to_owned())))
            .transpose()
    }
    fn count(&mut self) -> Result<usize, ParseError> {
        self.words.next().map_or(Ok(1), |word| {
            word.parse().map_err(|_| ParseError::BadCount(word.to_owned()))
        })
    }
    fn finish(mut self) -> Result<(), ParseError> {
        match self.words.next() {
            Some(extra) => Err(ParseError::UnexpectedArgument(extra.to_owned())),
            None => Ok(()),
        }
    }
}

impl std::str::FromStr for SessionCommand {
    type Err = ParseError;
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseError::MissingArgument("command"));
        };
        let mut args = Args { words };
        let command = match verb {
            "add" => Self::Add {
                name: args.next("name")?.to_owned(),
                parent: args.optional_id()?,
            },
            "fill" | "stroke" => {
                // Unwrap ok - verb matched one of the names above.
                let kind = verb.parse::<PropertyKind>().unwrap();
                Self::SetColor {
                    target: args.id("id")?,
                    kind,
                    to: args.next("color")?.parse()?,
                }
            }
            "cascade" => {
                let root = args.id("id")?;
                let word = args.next("property")?;
                let kind = word
                    .parse::<PropertyKind>()
                    .map_err(|_| ParseError::BadProperty(word.to_owned()))?;
                Self::Cascade { root, kind }
            }
            "undo" => Self::Undo(args.count()?),
            "redo" => Self::Redo(args.count()?),
            "remove" => Self::Remove(args.id("id")?),
            "list" => Self::List,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ParseError::UnknownCommand(other.to_owned())),
        };
        args.finish()?;
        Ok(command)
    }
}

pub struct Session {
    history: History<Scene>,
}
impl Session {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            history: History::new(Scene::new(), capacity),
        }
    }
    #[must_use]
    pub fn scene(&self) -> &Scene {
        self.history.store()
    }
    /// Run one command, writing any feedback to `out`. Returns false once the session should end.
    pub fn apply(
        &mut self,
        command: SessionCommand,
        out: &mut impl std::io::Write,
    ) -> std::io::Result<bool> {
        match command {
            SessionCommand::Add { name, parent } => {
                let location = match parent {
                    Some(parent) => Location::IndexIntoObject(parent, usize::MAX),
                    None => Location::IndexIntoRoot(usize::MAX),
                };
                match self.history.store_mut().add_object(location, name) {
                    Ok(id) => writeln!(out, "{id}")?,
                    Err(e) => writeln!(out, "can't add: {e}")?,
                }
            }
            SessionCommand::SetColor { target, kind, to } => {
                let Some(object) = self.history.store().get(target) else {
                    return writeln!(out, "no object {target}").map(|()| true);
                };
                let from = object.color(kind);
                self.history.set_color(target, from, to, kind);
            }
            SessionCommand::Cascade { root, kind } => {
                if self.history.store().get(root).is_none() {
                    return writeln!(out, "no object {root}").map(|()| true);
                }
                self.history.apply_color_to_children(root, kind);
            }
            SessionCommand::Undo(num) => {
                let undone = self.history.undo_n(num);
                writeln!(out, "undid {undone}, {} more available", self.history.undo_depth())?;
            }
            SessionCommand::Redo(num) => {
                let redone = self.history.redo_n(num);
                writeln!(out, "redid {redone}, {} more available", self.history.redo_depth())?;
            }
            SessionCommand::Remove(id) => match self.history.store_mut().remove_object(id) {
                Ok(removed) => writeln!(out, "removed {removed} objects")?,
                Err(e) => writeln!(out, "can't remove: {e}")?,
            },
            SessionCommand::List => {
                let scene = self.history.store();
                for object in scene.iter() {
                    let parent = scene
                        .parent_of(object.id())
                        .ok()
                        .flatten()
                        .map_or_else(|| "-".to_owned(), |parent| parent.to_string());
                    writeln!(
                        out,
                        "{} {:?} parent {parent} fill {} stroke {}",
                        object.id(),
                        object.name(),
                        object.fill_color,
                        object.stroke_color
                    )?;
                }
            }
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => return Ok(false),
        }
        // Nothing renders in a headless session, so derived state is simply discarded.
        let dirty = self.history.store_mut().take_dirty();
        if !dirty.is_empty() {
            log::debug!("{} objects need recomputing", dirty.len());
        }
        Ok(true)
    }
}

#[cfg(test)]
mod test {
    use super::{ParseError, Session, SessionCommand};
    use mathanim_core::{color::Color, state::PropertyKind, AnimObjId};

    fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        let command: SessionCommand = line.parse().unwrap();
        assert!(session.apply(command, &mut out).unwrap());
        String::from_utf8(out).unwrap()
    }
    #[test]
    fn parse() {
        let id = AnimObjId::default();
        assert_eq!(
            format!("fill {id} #ff0000").parse(),
            Ok(SessionCommand::SetColor {
                target: id,
                kind: PropertyKind::FillColor,
                to: Color::rgb(255, 0, 0)
            })
        );
        assert_eq!(
            format!("cascade {} stroke", id.id()).parse(),
            Ok(SessionCommand::Cascade {
                root: id,
                kind: PropertyKind::StrokeColor
            })
        );
        assert_eq!("undo".parse(), Ok(SessionCommand::Undo(1)));
        assert_eq!("  redo 3 ".parse(), Ok(SessionCommand::Redo(3)));
        assert_eq!(
            "add thing".parse(),
            Ok(SessionCommand::Add {
                name: "thing".to_owned(),
                parent: None
            })
        );
    }
    #[test]
    fn parse_errors() {
        assert_eq!(
            "".parse::<SessionCommand>(),
            Err(ParseError::MissingArgument("command"))
        );
        assert_eq!(
            "dance".parse::<SessionCommand>(),
            Err(ParseError::UnknownCommand("dance".to_owned()))
        );
        assert_eq!(
            "fill 1".parse::<SessionCommand>(),
            Err(ParseError::MissingArgument("color"))
        );
        assert!(matches!(
            "fill 1 #zz0000".parse::<SessionCommand>(),
            Err(ParseError::BadColor(_))
        ));
        assert_eq!(
            "cascade 1 opacity".parse::<SessionCommand>(),
            Err(ParseError::BadProperty("opacity".to_owned()))
        );
        assert_eq!(
            "undo lots".parse::<SessionCommand>(),
            Err(ParseError::BadCount("lots".to_owned()))
        );
        assert_eq!(
            "list please".parse::<SessionCommand>(),
            Err(ParseError::UnexpectedArgument("please".to_owned()))
        );
    }
    #[test]
    fn edit_undo_redo() {
        let mut session = Session::new(2);
        let root: AnimObjId = run(&mut session, "add root").trim().parse().unwrap();
        let child: AnimObjId = run(&mut session, &format!("add child {root}"))
            .trim()
            .parse()
            .unwrap();

        run(&mut session, &format!("fill {root} #00ff00"));
        run(&mut session, &format!("cascade {root} fill"));
        assert_eq!(
            session.scene().get(child).unwrap().fill_color,
            Color::rgb(0, 255, 0)
        );

        // Capacity 2 only remembers the cascade.
        assert_eq!(run(&mut session, "undo 5"), "undid 1, 0 more available\n");
        assert_eq!(session.scene().get(child).unwrap().fill_color, Color::BLACK);
        assert_eq!(
            session.scene().get(root).unwrap().fill_color,
            Color::rgb(0, 255, 0)
        );
        assert_eq!(run(&mut session, "redo"), "redid 1, 0 more available\n");
        assert_eq!(
            session.scene().get(child).unwrap().fill_color,
            Color::rgb(0, 255, 0)
        );
    }
    #[test]
    fn missing_objects() {
        let mut session = Session::new(4);
        let ghost = AnimObjId::default();
        assert_eq!(
            run(&mut session, &format!("fill {ghost} #ffffff")),
            format!("no object {ghost}\n")
        );
        assert_eq!(
            run(&mut session, "undo"),
            "undid 0, 0 more available\n"
        );
    }
    #[test]
    fn quit() {
        let mut session = Session::new(4);
        let mut out = Vec::new();
        assert!(!session.apply(SessionCommand::Quit, &mut out).unwrap());
    }
}
