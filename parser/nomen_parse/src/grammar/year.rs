//! Year variants.
//!
//! A plain year is four digits starting `1x` or `2x`; names keep years in
//! many decorated forms (ranges, brackets, page numbers, trailing
//! letters), each of which leaves a warning during AST building.

use nomen_chars::{is_digit, is_latin_lower};

use crate::engine::Engine;
use crate::rule::Rule;

impl Engine {
    /// `Year <- YearRange / YearApprox / YearWithParens / YearWithPage /
    ///          YearWithDot / YearWithChar / YearNum`
    pub(crate) fn year(&mut self) -> bool {
        self.node(Rule::Year, |e| {
            e.year_range()
                || e.year_approx()
                || e.year_with_parens()
                || e.year_with_page()
                || e.year_with_dot()
                || e.year_with_char()
                || e.year_num()
        })
    }

    /// `YearRange <- YearNum dash (nums+ ([a-z] / '?')*)`
    fn year_range(&mut self) -> bool {
        self.node(Rule::YearRange, |e| {
            if !(e.year_num() && e.eat('-')) {
                return false;
            }
            if e.eat_while(is_digit) == 0 {
                return false;
            }
            e.eat_while(|c| is_latin_lower(c) || c == '?');
            true
        })
    }

    /// `YearWithDot <- YearNum '.'`
    fn year_with_dot(&mut self) -> bool {
        self.node(Rule::YearWithDot, |e| e.year_num() && e.eat('.'))
    }

    /// `YearApprox <- '[' _? YearNum _? ']'`
    fn year_approx(&mut self) -> bool {
        self.node(Rule::YearApprox, |e| {
            if !e.eat('[') {
                return false;
            }
            e.opt_space();
            if !e.year_num() {
                return false;
            }
            e.opt_space();
            e.eat(']')
        })
    }

    /// `YearWithPage <- (YearWithChar / YearNum) _? ':' _? nums+`
    fn year_with_page(&mut self) -> bool {
        self.node(Rule::YearWithPage, |e| {
            if !(e.year_with_char() || e.year_num()) {
                return false;
            }
            e.opt_space();
            if !e.eat(':') {
                return false;
            }
            e.opt_space();
            e.eat_while(is_digit) >= 1
        })
    }

    /// `YearWithParens <- '(' (YearWithChar / YearNum) ')'`
    fn year_with_parens(&mut self) -> bool {
        self.node(Rule::YearWithParens, |e| {
            e.eat('(') && (e.year_with_char() || e.year_num()) && e.eat(')')
        })
    }

    /// `YearWithChar <- YearNum lASCII`
    fn year_with_char(&mut self) -> bool {
        self.node(Rule::YearWithChar, |e| {
            e.year_num() && e.eat_if(is_latin_lower)
        })
    }

    /// `YearNum <- ('1' / '2') ('0' / '7' / '8' / '9') nums (nums / '?') '?'*`
    fn year_num(&mut self) -> bool {
        self.node(Rule::YearNum, |e| {
            if !e.eat_if(|c| c == '1' || c == '2') {
                return false;
            }
            if !e.eat_if(|c| matches!(c, '0' | '7' | '8' | '9')) {
                return false;
            }
            if !e.eat_if(is_digit) {
                return false;
            }
            if !(e.eat_if(is_digit) || e.eat('?')) {
                return false;
            }
            e.eat_while(|c| c == '?');
            true
        })
    }
}
