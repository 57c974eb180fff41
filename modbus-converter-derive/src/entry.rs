use crate::utils::{expr_assign_predicate, get_punctuated, panic_no_key, panic_not_literal};
use proc_macro2::{Ident, Span};
use syn::{punctuated::Punctuated, token::Comma, Expr, ExprAssign, Field, Lit, Type};

#[derive(Debug, Clone)]
/// Single input parameter of a command. Parsed from field attributes and to be used in proc macros
pub struct Entry {
    pub field_name: String,
    pub field_ty: String,
    pub key: String,
    pub ty: RegisterType,
    pub cnt: Quantity,
}

pub type Quantity = u16;

/// Field types rendering as plain decimal digits.
const UNSIGNED_TYPES: [&str; 6] = ["u8", "u16", "u32", "u64", "u128", "usize"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterType {
    Holding,
    Coil,
    Input,
    Discrete,
}

impl From<String> for RegisterType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "holding" => RegisterType::Holding,
            "coil" => RegisterType::Coil,
            "input" => RegisterType::Input,
            "discrete" => RegisterType::Discrete,
            s => panic!("Invalid `ty` variant \"{s}\". Use one of \"holding\", \"coil\", \"input\" or \"discrete\"."),
        }
    }
}

impl RegisterType {
    pub fn unit_size(&self) -> Option<usize> {
        match self {
            RegisterType::Holding => Some(2),
            RegisterType::Coil => Some(1),
            RegisterType::Input | RegisterType::Discrete => None,
        }
    }
}

impl From<Field> for Entry {
    fn from(value: Field) -> Self {
        let field_name = value
            .ident
            .unwrap_or_else(|| panic!("Unexpected unnamed struct field."))
            .to_string();

        let field_ty = match &value.ty {
            Type::Path(type_path) => type_path
                .path
                .get_ident()
                .unwrap_or_else(|| panic!("Unexpected no ident for `{field_name}` field type."))
                .to_string(),
            _ => panic!("Unexpected `syn::Type` variant in `{field_name}` field."),
        };
        if !UNSIGNED_TYPES.contains(&field_ty.as_str()) {
            panic!("Field `{field_name}` has type `{field_ty}`. Parameters must be one of \"u8\", \"u16\", \"u32\", \"u64\", \"u128\" or \"usize\".");
        }

        let attr = value
            .attrs
            .iter()
            .find(|attr| attr.path().is_ident("modbus"))
            .unwrap_or_else(|| {
                panic!("Unexpected missing attribute `modbus` for `{field_name}` field.")
            });
        let punctuated = get_punctuated(attr, &field_name);

        let key = Self::get_key(&punctuated, &field_name);
        let ty = Self::get_ty(&punctuated, &field_name);
        let cnt = Self::get_cnt(&punctuated, &field_name);

        Self {
            field_name,
            field_ty,
            key,
            ty,
            cnt,
        }
    }
}

impl Entry {
    // Macro helpers

    pub fn field_name_ident(&self) -> Ident {
        Ident::new(&self.field_name, Span::call_site())
    }

    pub fn ty_ident(&self) -> Ident {
        let ty = match &self.ty {
            RegisterType::Holding => "Holding",
            RegisterType::Coil => "Coil",
            RegisterType::Input => "Input",
            RegisterType::Discrete => "Discrete",
        };
        Ident::new(ty, Span::call_site())
    }

    // Parsing helpers

    fn get_key(punctuated: &Punctuated<ExprAssign, Comma>, field_name: &str) -> String {
        punctuated
            .iter()
            .filter(expr_assign_predicate("key", field_name))
            .map(|expr_assign| match &*expr_assign.right {
                Expr::Lit(right) => match &right.lit {
                    Lit::Str(lit_str) => lit_str.value(),
                    _ => panic_not_literal("key", "string", field_name),
                },
                _ => panic_not_literal("key", "", field_name),
            })
            .next()
            .unwrap_or_else(|| field_name.to_string())
    }

    fn get_ty(punctuated: &Punctuated<ExprAssign, Comma>, field_name: &str) -> RegisterType {
        punctuated
            .iter()
            .filter(expr_assign_predicate("ty", field_name))
            .map(|expr_assign| match &*expr_assign.right {
                Expr::Lit(right) => match &right.lit {
                    Lit::Str(lit_str) => lit_str.value(),
                    _ => panic_not_literal("ty", "string", field_name),
                },
                _ => panic_not_literal("ty", "", field_name),
            })
            .next()
            .unwrap_or_else(|| panic_no_key("ty", field_name))
            .into()
    }

    fn get_cnt(punctuated: &Punctuated<ExprAssign, Comma>, field_name: &str) -> Quantity {
        punctuated
            .iter()
            .filter(expr_assign_predicate("cnt", field_name))
            .map(|expr_assign| match &*expr_assign.right {
                Expr::Lit(right) => match &right.lit {
                    Lit::Int(lit_int) => lit_int.clone(),
                    _ => panic_not_literal("cnt", "integer", field_name),
                },
                _ => panic_not_literal("cnt", "", field_name),
            })
            .next()
            .unwrap_or_else(|| panic_no_key("cnt", field_name))
            .base10_parse::<Quantity>()
            .unwrap_or_else(|_| panic!("In `modbus` attribute for `{field_name}`, the key `cnt` could not be parsed to u16."))
    }
}
