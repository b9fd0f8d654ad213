//! printf 风格的模板替换
//!
//! 支持的动词：`%v %s %d %i %f %F %e %E %g %G %x %X %o %b %q %t %c %%`，
//! 标志位 `- + # 0 空格`，宽度与 `.精度`。
//!
//! 模板与参数不匹配时不会 panic，而是在输出中内联错误标记：
//!
//! | 情况 | 输出 |
//! |------|------|
//! | 参数不足 | `%!d(MISSING)` |
//! | 类型不符 | `%!d(string=abc)` |
//! | 未知动词 | `%!z(int=5)` |
//! | 模板以 `%` 结尾 | `%!(NOVERB)` |
//! | 宽度超过 1000000 | `%!(BADWIDTH)` |
//! | 精度超过 1000000 | `%!(BADPREC)` |
//! | 参数多余 | `%!(EXTRA string=x, int=1)` |

use std::fmt::Write;

use crate::log::value::Value;

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

// 宽度与精度上限，超出时输出错误标记并忽略该值
const MAX_WIDTH: usize = 1_000_000;

/// 将 `args` 按 `template` 替换，返回渲染结果
pub fn sprintf(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut next_arg = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.minus = true,
                '+' => spec.plus = true,
                '#' => spec.sharp = true,
                '0' => spec.zero = true,
                ' ' => spec.space = true,
                _ => break,
            }
            chars.next();
        }
        spec.width = read_number(&mut chars);
        if spec.width.is_some_and(|w| w > MAX_WIDTH) {
            out.push_str("%!(BADWIDTH)");
            spec.width = None;
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            let precision = read_number(&mut chars).unwrap_or(0);
            if precision > MAX_WIDTH {
                out.push_str("%!(BADPREC)");
            } else {
                spec.precision = Some(precision);
            }
        }

        let verb = match chars.next() {
            Some(verb) => verb,
            None => {
                out.push_str("%!(NOVERB)");
                break;
            }
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next_arg) {
            Some(arg) => {
                next_arg += 1;
                format_arg(&mut out, verb, &spec, arg);
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    if next_arg < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[next_arg..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            push_typed(&mut out, arg);
        }
        out.push(')');
    }

    out
}

fn read_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = Some(
            value
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(digit as usize),
        );
        chars.next();
    }
    value
}

fn push_typed(out: &mut String, arg: &Value) {
    match arg {
        Value::Null => out.push_str("<nil>"),
        other => {
            let _ = write!(out, "{}={}", other.type_name(), other);
        }
    }
}

fn bad_verb(out: &mut String, verb: char, arg: &Value) {
    let _ = write!(out, "%!{}(", verb);
    push_typed(out, arg);
    out.push(')');
}

fn format_arg(out: &mut String, verb: char, spec: &Spec, arg: &Value) {
    match (verb, arg) {
        ('v', Value::Str(s)) if spec.sharp => pad(out, spec, &format!("{:?}", s), false),
        ('v', Value::Int(n)) => format_int(out, spec, *n < 0, n.unsigned_abs(), 10, false),
        ('v', Value::Uint(n)) => format_int(out, spec, false, *n, 10, false),
        ('v', Value::Float(x)) => format_float(out, spec, 'g', *x),
        ('v', other) => pad(out, spec, &other.to_string(), false),

        ('s', Value::Str(s)) | ('s', Value::Debug(s)) => pad(out, spec, truncate(s, spec), false),
        ('s', Value::Char(c)) => pad(out, spec, &c.to_string(), false),

        ('q', Value::Str(s)) => pad(out, spec, &format!("{:?}", s), false),
        ('q', Value::Char(c)) => pad(out, spec, &format!("{:?}", c), false),

        ('t', Value::Bool(b)) => pad(out, spec, if *b { "true" } else { "false" }, false),

        ('d' | 'i', Value::Int(n)) => format_int(out, spec, *n < 0, n.unsigned_abs(), 10, false),
        ('d' | 'i', Value::Uint(n)) => format_int(out, spec, false, *n, 10, false),
        ('d' | 'i', Value::Char(c)) => format_int(out, spec, false, *c as u64, 10, false),

        ('x' | 'X' | 'o' | 'b', Value::Int(n)) => {
            format_int(out, spec, *n < 0, n.unsigned_abs(), radix(verb), verb == 'X')
        }
        ('x' | 'X' | 'o' | 'b', Value::Uint(n)) => {
            format_int(out, spec, false, *n, radix(verb), verb == 'X')
        }
        ('x' | 'X', Value::Str(s)) => {
            let mut hex = String::with_capacity(s.len() * 2);
            for byte in s.bytes() {
                let _ = if verb == 'X' {
                    write!(hex, "{:02X}", byte)
                } else {
                    write!(hex, "{:02x}", byte)
                };
            }
            pad(out, spec, &hex, false)
        }

        ('c', Value::Char(c)) => pad(out, spec, &c.to_string(), false),
        ('c', Value::Int(n)) => match u32::try_from(*n).ok().and_then(char::from_u32) {
            Some(c) => pad(out, spec, &c.to_string(), false),
            None => pad(out, spec, "\u{FFFD}", false),
        },
        ('c', Value::Uint(n)) => match u32::try_from(*n).ok().and_then(char::from_u32) {
            Some(c) => pad(out, spec, &c.to_string(), false),
            None => pad(out, spec, "\u{FFFD}", false),
        },

        ('f' | 'F' | 'e' | 'E' | 'g' | 'G', Value::Float(x)) => format_float(out, spec, verb, *x),

        _ => bad_verb(out, verb, arg),
    }
}

fn radix(verb: char) -> u32 {
    match verb {
        'x' | 'X' => 16,
        'o' => 8,
        'b' => 2,
        _ => 10,
    }
}

fn truncate<'a>(s: &'a str, spec: &Spec) -> &'a str {
    match spec.precision {
        Some(p) => match s.char_indices().nth(p) {
            Some((idx, _)) => &s[..idx],
            None => s,
        },
        None => s,
    }
}

fn sign_of(spec: &Spec, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn format_int(out: &mut String, spec: &Spec, negative: bool, magnitude: u64, radix: u32, upper: bool) {
    let mut digits = match radix {
        16 if upper => format!("{:X}", magnitude),
        16 => format!("{:x}", magnitude),
        8 => format!("{:o}", magnitude),
        2 => format!("{:b}", magnitude),
        _ => magnitude.to_string(),
    };
    if let Some(p) = spec.precision {
        if p == 0 && magnitude == 0 {
            digits.clear();
        } else if digits.len() < p {
            digits.insert_str(0, &"0".repeat(p - digits.len()));
        }
    }

    let prefix = match (spec.sharp, radix) {
        (true, 16) if upper => "0X",
        (true, 16) => "0x",
        (true, 8) if !digits.starts_with('0') => "0",
        (true, 2) => "0b",
        _ => "",
    };

    let head = format!("{}{}", sign_of(spec, negative), prefix);
    // 有精度时 0 标志不生效
    let zero_pad = spec.zero && !spec.minus && spec.precision.is_none();
    pad_number(out, spec, &head, &digits, zero_pad);
}

fn format_float(out: &mut String, spec: &Spec, verb: char, x: f64) {
    if x.is_nan() {
        return pad(out, spec, "NaN", false);
    }
    if x.is_infinite() {
        let text = if x < 0.0 {
            "-Inf"
        } else if spec.plus {
            "+Inf"
        } else if spec.space {
            " Inf"
        } else {
            "+Inf"
        };
        return pad(out, spec, text, false);
    }

    let negative = x.is_sign_negative() && x != 0.0;
    let abs = x.abs();
    let body = match verb {
        'f' | 'F' => format!("{:.*}", spec.precision.unwrap_or(6), abs),
        'e' | 'E' => exp_notation(abs, spec.precision.unwrap_or(6), verb == 'E'),
        _ => general_notation(abs, spec.precision, verb == 'G'),
    };

    let zero_pad = spec.zero && !spec.minus;
    pad_number(out, spec, sign_of(spec, negative), &body, zero_pad);
}

/// `1.5e3` -> `1.500000e+03`
fn exp_notation(abs: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, abs);
    fix_exponent(&raw, upper)
}

fn fix_exponent(raw: &str, upper: bool) -> String {
    let (mantissa, exp) = match raw.split_once('e') {
        Some(parts) => parts,
        None => return raw.to_string(),
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let e = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}{}{}{:02}", mantissa, e, sign, exp.unsigned_abs())
}

fn general_notation(abs: f64, precision: Option<usize>, upper: bool) -> String {
    match precision {
        None => {
            // 最短表示；指数 < -4 或 >= 21 时改用科学计数法
            if abs == 0.0 || (1e-4..1e21).contains(&abs) {
                format!("{}", abs)
            } else {
                fix_exponent(&format!("{:e}", abs), upper)
            }
        }
        Some(p) => {
            let p = p.max(1);
            let sci = format!("{:.*e}", p - 1, abs);
            let exp: i32 = sci
                .split_once('e')
                .and_then(|(_, e)| e.parse().ok())
                .unwrap_or(0);
            if exp < -4 || exp >= p as i32 {
                let (mantissa, _) = sci.split_once('e').unwrap_or((sci.as_str(), ""));
                let trimmed = trim_fraction(mantissa);
                let e = if upper { 'E' } else { 'e' };
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}{}{}{:02}", trimmed, e, sign, exp.unsigned_abs())
            } else {
                let decimals = (p as i32 - 1 - exp).max(0) as usize;
                trim_fraction(&format!("{:.*}", decimals, abs)).to_string()
            }
        }
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn pad_number(out: &mut String, spec: &Spec, head: &str, body: &str, zero_pad: bool) {
    let len = head.chars().count() + body.chars().count();
    let width = spec.width.unwrap_or(0);
    if width <= len {
        out.push_str(head);
        out.push_str(body);
    } else if spec.minus {
        out.push_str(head);
        out.push_str(body);
        out.extend(std::iter::repeat(' ').take(width - len));
    } else if zero_pad {
        out.push_str(head);
        out.extend(std::iter::repeat('0').take(width - len));
        out.push_str(body);
    } else {
        out.extend(std::iter::repeat(' ').take(width - len));
        out.push_str(head);
        out.push_str(body);
    }
}

fn pad(out: &mut String, spec: &Spec, text: &str, zero_pad: bool) {
    pad_number(out, spec, "", text, zero_pad)
}
