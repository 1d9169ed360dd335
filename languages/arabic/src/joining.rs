//! Contextual letter forms for the unscramble preview.
//!
//! Letters are joined with tatweel so the preview reads as one word even
//! where the terminal does no shaping of its own.

use mufrodat_core::preprocess::TATWEEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joining {
    /// Joins on both sides
    Dual,
    /// Joins only to the letter before it
    Right,
    /// Never joins
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Isolated,
    Initial,
    Medial,
    Final,
}

/// Joining class of a base letter; `None` for anything not an Arabic letter
pub fn joining_type(c: char) -> Option<Joining> {
    match c {
        'ا' | 'أ' | 'إ' | 'آ' | 'ٱ' | 'د' | 'ذ' | 'ر' | 'ز' | 'و' | 'ؤ' | 'ة' | 'ى' => {
            Some(Joining::Right)
        }
        'ء' => Some(Joining::None),
        'ب' | 'ت' | 'ث' | 'ج' | 'ح' | 'خ' | 'س' | 'ش' | 'ص' | 'ض' | 'ط' | 'ظ' | 'ع' | 'غ'
        | 'ف' | 'ق' | 'ك' | 'ل' | 'م' | 'ن' | 'ه' | 'ي' | 'ئ' | 'ی' | 'ک' | 'پ' | 'چ' | 'گ' => {
            Some(Joining::Dual)
        }
        _ => None,
    }
}

fn base_letter(unit: &str) -> Option<Joining> {
    unit.chars().next().and_then(joining_type)
}

/// Form of every unit given its neighbours
pub fn forms<S: AsRef<str>>(units: &[S]) -> Vec<Form> {
    let classes: Vec<Option<Joining>> = units.iter().map(|u| base_letter(u.as_ref())).collect();

    (0..classes.len())
        .map(|i| {
            let current = classes[i];
            let joins_prev = i > 0
                && matches!(classes[i - 1], Some(Joining::Dual))
                && matches!(current, Some(Joining::Dual | Joining::Right));
            let joins_next = matches!(current, Some(Joining::Dual))
                && classes.get(i + 1).is_some_and(|next| next.is_some_and(|j| j != Joining::None));

            match (joins_prev, joins_next) {
                (true, true) => Form::Medial,
                (true, false) => Form::Final,
                (false, true) => Form::Initial,
                (false, false) => Form::Isolated,
            }
        })
        .collect()
}

/// Render units with one tatweel marking each connection
pub fn join_units<S: AsRef<str>>(units: &[S]) -> String {
    let mut out = String::new();

    for (unit, form) in units.iter().zip(forms(units)) {
        out.push_str(unit.as_ref());
        if matches!(form, Form::Initial | Form::Medial) {
            out.push(TATWEEL);
        }
    }

    out
}
