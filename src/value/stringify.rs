use super::visit::{AcceptValue, VisitValue};
use super::{Die, Domain, List, Number};

pub trait Stringify {
    fn stringify<A: AcceptValue>(&mut self, a: &A) -> String {
        a.accept(self)
    }

    fn str_number(&mut self, x: &Number) -> String {
        x.to_string()
    }

    fn str_list(&mut self, list: &List) -> String {
        let items = list
            .iter()
            .map(|value| self.stringify(value))
            .collect::<Vec<_>>()
            .join(",");
        format!("[{}]", items)
    }

    fn str_die(&mut self, die: &Die) -> String {
        self.str_number(&die.value())
    }
}

/// Prints dice as their bare outcome, dropping the domain.
#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify<A: AcceptValue>(&mut self, value: &A) -> String {
        Stringify::stringify(self, value)
    }
}

impl Stringify for SimpleStringifier {}

/// The canonical form: parses back to an equal value, dice included.
#[derive(Default)]
pub struct CodeStringifier;

impl CodeStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify<A: AcceptValue>(&mut self, value: &A) -> String {
        Stringify::stringify(self, value)
    }
}

impl Stringify for CodeStringifier {
    fn str_die(&mut self, die: &Die) -> String {
        let sides = match die.domain() {
            Domain::Sides(n) => n.to_string(),
            Domain::Faces(faces) => {
                let faces: List = faces.iter().cloned().collect();
                self.str_list(&faces)
            }
        };
        format!("{{!die,{},{}}}", die.value(), sides)
    }
}

/// An indented, one-node-per-line dump.
#[derive(Default)]
pub struct TreeStringifier {
    level: usize,
}

impl TreeStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify<A: AcceptValue>(&mut self, value: &A) -> String {
        self.level = 0;
        Stringify::stringify(self, value)
    }

    fn indent(&self) -> String {
        "  ".repeat(self.level)
    }

    fn nested<A: AcceptValue>(&mut self, depth: usize, a: &A) -> String {
        self.level += depth;
        let ret = Stringify::stringify(self, a);
        self.level -= depth;
        ret
    }
}

impl Stringify for TreeStringifier {
    fn str_number(&mut self, x: &Number) -> String {
        format!("{}Number: {}", self.indent(), x)
    }

    fn str_list(&mut self, list: &List) -> String {
        let mut ret = format!("{}List:", self.indent());
        for value in list {
            ret.push('\n');
            ret.push_str(&self.nested(1, value));
        }
        ret
    }

    fn str_die(&mut self, die: &Die) -> String {
        let indent = self.indent();
        let sides = self.nested(2, &die.domain().to_value());
        format!(
            "{0}Die:\n{0}  Value: {1}\n{0}  Sides:\n{2}",
            indent,
            die.value(),
            sides
        )
    }
}

impl<S: ?Sized> VisitValue for S
where
    S: Stringify,
{
    type Output = String;

    fn visit_number(&mut self, x: &Number) -> Self::Output {
        self.str_number(x)
    }

    fn visit_list(&mut self, x: &List) -> Self::Output {
        self.str_list(x)
    }

    fn visit_die(&mut self, x: &Die) -> Self::Output {
        self.str_die(x)
    }
}
