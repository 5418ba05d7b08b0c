//! Conversion between JVM type descriptors (`[I`, `Ljava/lang/String;`)
//! and the source-level type names used by Mojang's mappings (`int[]`, `java.lang.String`).
//!
//! Decoding is an explicit scanner: every type token is an `[` prefix run
//! (the array depth) followed by a single terminal, which is either a primitive code
//! or an `L<internal-name>;` object reference.
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use failure_derive::Fail;

const ARRAY_SUFFIX: &str = "[]";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PrimitiveType {
    Int,
    Boolean,
    Double,
    Long,
    Float,
    Byte,
    Void,
    Short,
    Char
}
impl PrimitiveType {
    #[inline]
    pub fn code(self) -> char {
        match self {
            PrimitiveType::Int => 'I',
            PrimitiveType::Boolean => 'Z',
            PrimitiveType::Double => 'D',
            PrimitiveType::Long => 'J',
            PrimitiveType::Float => 'F',
            PrimitiveType::Byte => 'B',
            PrimitiveType::Void => 'V',
            PrimitiveType::Short => 'S',
            PrimitiveType::Char => 'C',
        }
    }
    pub fn from_code(code: char) -> Option<PrimitiveType> {
        Some(match code {
            'I' => PrimitiveType::Int,
            'Z' => PrimitiveType::Boolean,
            'D' => PrimitiveType::Double,
            'J' => PrimitiveType::Long,
            'F' => PrimitiveType::Float,
            'B' => PrimitiveType::Byte,
            'V' => PrimitiveType::Void,
            'S' => PrimitiveType::Short,
            'C' => PrimitiveType::Char,
            _ => return None
        })
    }
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Int => "int",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Double => "double",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Void => "void",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
        }
    }
    pub fn from_name(name: &str) -> Option<PrimitiveType> {
        Some(match name {
            "int" => PrimitiveType::Int,
            "boolean" => PrimitiveType::Boolean,
            "double" => PrimitiveType::Double,
            "long" => PrimitiveType::Long,
            "float" => PrimitiveType::Float,
            "byte" => PrimitiveType::Byte,
            "void" => PrimitiveType::Void,
            "short" => PrimitiveType::Short,
            "char" => PrimitiveType::Char,
            _ => return None
        })
    }
}

/// The terminal of a type token, after any array prefix.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TerminalType {
    Primitive(PrimitiveType),
    /// An object type, using dotted names (`java.lang.String`)
    Object(String)
}

/// A single decoded type: `array_depth` dimensions of `terminal`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeToken {
    pub array_depth: usize,
    pub terminal: TerminalType
}
impl TypeToken {
    /// Parse a source-level type name like `java.lang.String[][]`
    pub fn from_type_name(name: &str) -> TypeToken {
        let (base, array_depth) = split_array_suffix(name);
        let terminal = match PrimitiveType::from_name(base) {
            Some(primitive) => TerminalType::Primitive(primitive),
            None => TerminalType::Object(base.into())
        };
        TypeToken { array_depth, terminal }
    }
    pub fn type_name(&self) -> String {
        let mut result = match self.terminal {
            TerminalType::Primitive(primitive) => String::from(primitive.name()),
            TerminalType::Object(ref name) => name.clone(),
        };
        for _ in 0..self.array_depth {
            result.push_str(ARRAY_SUFFIX);
        }
        result
    }
    pub fn descriptor(&self) -> String {
        let mut result = String::new();
        for _ in 0..self.array_depth {
            result.push('[');
        }
        match self.terminal {
            TerminalType::Primitive(primitive) => result.push(primitive.code()),
            TerminalType::Object(ref name) => {
                result.push('L');
                result.extend(name.chars().map(|c| if c == '.' { '/' } else { c }));
                result.push(';');
            }
        }
        result
    }
}
impl Display for TypeToken {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}
impl FromStr for TypeToken {
    type Err = InvalidDescriptor;

    #[inline]
    fn from_str(s: &str) -> Result<TypeToken, InvalidDescriptor> {
        let mut scanner = DescriptorScanner::new(s);
        let token = scanner.next_token()?;
        if !scanner.is_empty() {
            return Err(InvalidDescriptor::new(s, "trailing data after type"))
        }
        Ok(token)
    }
}

/// Strip any number of trailing `[]` from a type name, returning the base name and array depth
pub fn split_array_suffix(name: &str) -> (&str, usize) {
    let mut base = name;
    let mut depth = 0;
    while base.ends_with(ARRAY_SUFFIX) {
        base = &base[..base.len() - ARRAY_SUFFIX.len()];
        depth += 1;
    }
    (base, depth)
}

struct DescriptorScanner<'a> {
    original: &'a str,
    remaining: &'a str,
}
impl<'a> DescriptorScanner<'a> {
    #[inline]
    fn new(original: &'a str) -> Self {
        DescriptorScanner { original, remaining: original }
    }
    #[inline]
    fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
    fn error(&self, reason: &'static str) -> InvalidDescriptor {
        InvalidDescriptor::new(self.original, reason)
    }
    fn next_token(&mut self) -> Result<TypeToken, InvalidDescriptor> {
        let array_depth = self.remaining.len()
            - self.remaining.trim_start_matches('[').len();
        self.remaining = &self.remaining[array_depth..];
        let code = self.remaining.chars().next()
            .ok_or_else(|| self.error("missing terminal type"))?;
        let terminal = if code == 'L' {
            let end = self.remaining.find(';')
                .ok_or_else(|| self.error("unterminated object type"))?;
            if end == 1 {
                return Err(self.error("empty object type"))
            }
            let name = self.remaining[1..end].replace('/', ".");
            self.remaining = &self.remaining[(end + 1)..];
            TerminalType::Object(name)
        } else {
            let primitive = PrimitiveType::from_code(code)
                .ok_or_else(|| self.error("unknown terminal type"))?;
            self.remaining = &self.remaining[code.len_utf8()..];
            TerminalType::Primitive(primitive)
        };
        Ok(TypeToken { array_depth, terminal })
    }
}

/// Decode a single descriptor (`[[I`) into a type name (`int[][]`)
#[inline]
pub fn decode_type(descriptor: &str) -> Result<String, InvalidDescriptor> {
    Ok(descriptor.parse::<TypeToken>()?.type_name())
}

/// Decode a run of concatenated descriptors, such as the body of a method's parameter list.
pub fn decode_type_list(body: &str) -> Result<Vec<String>, InvalidDescriptor> {
    let mut scanner = DescriptorScanner::new(body);
    let mut result = Vec::new();
    while !scanner.is_empty() {
        result.push(scanner.next_token()?.type_name());
    }
    Ok(result)
}

/// Encode a type name (`java.lang.String[]`) as a descriptor (`[Ljava/lang/String;`)
#[inline]
pub fn encode_type(name: &str) -> String {
    if name.is_empty() { return String::new() }
    TypeToken::from_type_name(name).descriptor()
}

pub fn encode_signature<S: AsRef<str>>(param_types: &[S], return_type: &str) -> String {
    let mut result = String::from("(");
    for param in param_types {
        result.push_str(&encode_type(param.as_ref()));
    }
    result.push(')');
    result.push_str(&encode_type(return_type));
    result
}

/// Split a method descriptor into its decoded parameter types and return type
pub fn decode_signature(descriptor: &str) -> Result<(Vec<String>, String), InvalidDescriptor> {
    let error = |reason| InvalidDescriptor::new(descriptor, reason);
    if !descriptor.starts_with('(') {
        return Err(error("method descriptor must start with '('"))
    }
    let close = descriptor.find(')')
        .ok_or_else(|| error("unterminated parameter list"))?;
    let params = decode_type_list(&descriptor[1..close])?;
    let return_type = decode_type(&descriptor[(close + 1)..])?;
    Ok((params, return_type))
}

#[derive(Debug, Fail)]
#[fail(display = "Invalid descriptor {:?}: {}", descriptor, reason)]
pub struct InvalidDescriptor {
    descriptor: String,
    reason: &'static str
}
impl InvalidDescriptor {
    #[inline]
    fn new(descriptor: &str, reason: &'static str) -> InvalidDescriptor {
        InvalidDescriptor { descriptor: descriptor.into(), reason }
    }
}
