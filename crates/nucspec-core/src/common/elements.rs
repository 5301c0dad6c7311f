//! Periodic-table lookup for element symbols, names and atomic numbers.
//!
//! Only identity data lives here; nuclear data (half-lives, masses) comes
//! from [`crate::isotope::NuclideTable`].

pub const MAX_ATOMIC_NUMBER: usize = 118;

const ELEMENTS: [(&str, &str); MAX_ATOMIC_NUMBER] = [
    ("H", "Hydrogen"),
    ("He", "Helium"),
    ("Li", "Lithium"),
    ("Be", "Beryllium"),
    ("B", "Boron"),
    ("C", "Carbon"),
    ("N", "Nitrogen"),
    ("O", "Oxygen"),
    ("F", "Fluorine"),
    ("Ne", "Neon"),
    ("Na", "Sodium"),
    ("Mg", "Magnesium"),
    ("Al", "Aluminum"),
    ("Si", "Silicon"),
    ("P", "Phosphorus"),
    ("S", "Sulfur"),
    ("Cl", "Chlorine"),
    ("Ar", "Argon"),
    ("K", "Potassium"),
    ("Ca", "Calcium"),
    ("Sc", "Scandium"),
    ("Ti", "Titanium"),
    ("V", "Vanadium"),
    ("Cr", "Chromium"),
    ("Mn", "Manganese"),
    ("Fe", "Iron"),
    ("Co", "Cobalt"),
    ("Ni", "Nickel"),
    ("Cu", "Copper"),
    ("Zn", "Zinc"),
    ("Ga", "Gallium"),
    ("Ge", "Germanium"),
    ("As", "Arsenic"),
    ("Se", "Selenium"),
    ("Br", "Bromine"),
    ("Kr", "Krypton"),
    ("Rb", "Rubidium"),
    ("Sr", "Strontium"),
    ("Y", "Yttrium"),
    ("Zr", "Zirconium"),
    ("Nb", "Niobium"),
    ("Mo", "Molybdenum"),
    ("Tc", "Technetium"),
    ("Ru", "Ruthenium"),
    ("Rh", "Rhodium"),
    ("Pd", "Palladium"),
    ("Ag", "Silver"),
    ("Cd", "Cadmium"),
    ("In", "Indium"),
    ("Sn", "Tin"),
    ("Sb", "Antimony"),
    ("Te", "Tellurium"),
    ("I", "Iodine"),
    ("Xe", "Xenon"),
    ("Cs", "Cesium"),
    ("Ba", "Barium"),
    ("La", "Lanthanum"),
    ("Ce", "Cerium"),
    ("Pr", "Praseodymium"),
    ("Nd", "Neodymium"),
    ("Pm", "Promethium"),
    ("Sm", "Samarium"),
    ("Eu", "Europium"),
    ("Gd", "Gadolinium"),
    ("Tb", "Terbium"),
    ("Dy", "Dysprosium"),
    ("Ho", "Holmium"),
    ("Er", "Erbium"),
    ("Tm", "Thulium"),
    ("Yb", "Ytterbium"),
    ("Lu", "Lutetium"),
    ("Hf", "Hafnium"),
    ("Ta", "Tantalum"),
    ("W", "Tungsten"),
    ("Re", "Rhenium"),
    ("Os", "Osmium"),
    ("Ir", "Iridium"),
    ("Pt", "Platinum"),
    ("Au", "Gold"),
    ("Hg", "Mercury"),
    ("Tl", "Thallium"),
    ("Pb", "Lead"),
    ("Bi", "Bismuth"),
    ("Po", "Polonium"),
    ("At", "Astatine"),
    ("Rn", "Radon"),
    ("Fr", "Francium"),
    ("Ra", "Radium"),
    ("Ac", "Actinium"),
    ("Th", "Thorium"),
    ("Pa", "Protactinium"),
    ("U", "Uranium"),
    ("Np", "Neptunium"),
    ("Pu", "Plutonium"),
    ("Am", "Americium"),
    ("Cm", "Curium"),
    ("Bk", "Berkelium"),
    ("Cf", "Californium"),
    ("Es", "Einsteinium"),
    ("Fm", "Fermium"),
    ("Md", "Mendelevium"),
    ("No", "Nobelium"),
    ("Lr", "Lawrencium"),
    ("Rf", "Rutherfordium"),
    ("Db", "Dubnium"),
    ("Sg", "Seaborgium"),
    ("Bh", "Bohrium"),
    ("Hs", "Hassium"),
    ("Mt", "Meitnerium"),
    ("Ds", "Darmstadtium"),
    ("Rg", "Roentgenium"),
    ("Cn", "Copernicium"),
    ("Nh", "Nihonium"),
    ("Fl", "Flerovium"),
    ("Mc", "Moscovium"),
    ("Lv", "Livermorium"),
    ("Ts", "Tennessine"),
    ("Og", "Oganesson"),
];

/// Alternative spellings accepted for element names.
const NAME_ALIASES: [(&str, usize); 3] = [("Aluminium", 13), ("Sulphur", 16), ("Caesium", 55)];

pub fn element_symbol(atomic_number: usize) -> Option<&'static str> {
    let index = index_for_atomic_number(atomic_number)?;
    Some(ELEMENTS[index].0)
}

pub fn element_name(atomic_number: usize) -> Option<&'static str> {
    let index = index_for_atomic_number(atomic_number)?;
    Some(ELEMENTS[index].1)
}

pub fn atomic_number_for_symbol(symbol: &str) -> Option<usize> {
    let normalized = symbol.trim();
    if normalized.is_empty() {
        return None;
    }

    ELEMENTS
        .iter()
        .position(|(candidate, _)| candidate.eq_ignore_ascii_case(normalized))
        .map(|index| index + 1)
}

pub fn atomic_number_for_name(name: &str) -> Option<usize> {
    let normalized = name.trim();
    if normalized.is_empty() {
        return None;
    }

    ELEMENTS
        .iter()
        .position(|(_, candidate)| candidate.eq_ignore_ascii_case(normalized))
        .map(|index| index + 1)
        .or_else(|| {
            NAME_ALIASES
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(normalized))
                .map(|(_, z)| *z)
        })
}

/// Resolve a symbol, a name or a decimal atomic number (all case-insensitive).
pub fn resolve_element(token: &str) -> Option<usize> {
    let normalized = token.trim();
    if let Ok(z) = normalized.parse::<usize>() {
        return index_for_atomic_number(z).map(|index| index + 1);
    }
    atomic_number_for_symbol(normalized).or_else(|| atomic_number_for_name(normalized))
}

const fn index_for_atomic_number(atomic_number: usize) -> Option<usize> {
    if atomic_number == 0 || atomic_number > MAX_ATOMIC_NUMBER {
        None
    } else {
        Some(atomic_number - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        MAX_ATOMIC_NUMBER, atomic_number_for_name, atomic_number_for_symbol, element_name,
        element_symbol, resolve_element,
    };

    #[test]
    fn lookup_rejects_out_of_range_atomic_numbers() {
        assert!(element_symbol(0).is_none());
        assert!(element_symbol(119).is_none());
        assert!(element_name(119).is_none());
        assert_eq!(resolve_element("119"), None);
        assert_eq!(resolve_element("0"), None);
    }

    #[test]
    fn known_symbol_roundtrip_matches_atomic_number() {
        assert_eq!(atomic_number_for_symbol("Tc"), Some(43));
        assert_eq!(atomic_number_for_symbol("tc"), Some(43));
        assert_eq!(atomic_number_for_symbol(" U "), Some(92));
        assert_eq!(element_symbol(118), Some("Og"));
        assert_eq!(atomic_number_for_symbol(""), None);
        assert_eq!(atomic_number_for_symbol("Xx"), None);
    }

    #[test]
    fn names_and_numbers_resolve_case_insensitively() {
        assert_eq!(atomic_number_for_name("HAFNIUM"), Some(72));
        assert_eq!(atomic_number_for_name("caesium"), Some(55));
        assert_eq!(resolve_element("technetium"), Some(43));
        assert_eq!(resolve_element("43"), Some(43));
        assert_eq!(resolve_element("Mn"), Some(25));
        assert_eq!(resolve_element("G"), None);
    }

    #[test]
    fn every_row_has_distinct_symbol() {
        for z in 1..=MAX_ATOMIC_NUMBER {
            let symbol = element_symbol(z).expect("symbol should exist for in-range z");
            assert_eq!(atomic_number_for_symbol(symbol), Some(z), "z={z}");
            let name = element_name(z).expect("name should exist for in-range z");
            assert_eq!(atomic_number_for_name(name), Some(z), "z={z}");
        }
    }
}
