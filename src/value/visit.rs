use super::{Die, List, Number};

pub trait VisitValue {
    type Output;

    fn visit<A: AcceptValue>(&mut self, a: &A) -> Self::Output {
        a.accept(self)
    }

    fn visit_number(&mut self, x: &Number) -> Self::Output;

    fn visit_list(&mut self, x: &List) -> Self::Output;

    fn visit_die(&mut self, x: &Die) -> Self::Output;
}

#[enum_dispatch::enum_dispatch]
pub trait AcceptValue: Sized {
    fn accept<V: VisitValue + ?Sized>(&self, v: &mut V) -> V::Output;
}

impl AcceptValue for Number {
    fn accept<V: VisitValue + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_number(self)
    }
}

impl AcceptValue for List {
    fn accept<V: VisitValue + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_list(self)
    }
}

impl AcceptValue for Die {
    fn accept<V: VisitValue + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_die(self)
    }
}
