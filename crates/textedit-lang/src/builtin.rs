//! Built-in language definitions.
//!
//! Each constructor builds a fresh definition; nothing is cached globally.

use crate::tokenize;
use crate::{ColorClass, Identifier, LanguageDefinition};

const BUILTIN_FUNCTION: &str = "Built-in function";

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Alignas", "_Alignof", "_Atomic", "_Bool",
    "_Complex", "_Generic", "_Imaginary", "_Noreturn", "_Static_assert", "_Thread_local",
];

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "atomic_cancel", "atomic_commit",
    "atomic_noexcept", "auto", "bitand", "bitor", "bool", "break", "case", "catch", "char",
    "char16_t", "char32_t", "class", "compl", "concept", "const", "constexpr", "const_cast",
    "continue", "decltype", "default", "delete", "do", "double", "dynamic_cast", "else", "enum",
    "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if", "import",
    "inline", "int", "long", "module", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "synchronized", "template", "this",
    "thread_local", "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned",
    "using", "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

const C_FUNCTIONS: &[&str] = &[
    "abort", "abs", "acos", "asin", "atan", "atexit", "atof", "atoi", "atol", "ceil", "clock",
    "cosh", "ctime", "div", "exit", "fabs", "floor", "fmod", "getchar", "getenv", "isalnum",
    "isalpha", "isdigit", "isgraph", "ispunct", "isspace", "isupper", "kbhit", "log10", "log2",
    "log", "memcmp", "modf", "pow", "printf", "sprintf", "snprintf", "putchar", "putenv", "puts",
    "rand", "remove", "rename", "sinh", "sqrt", "srand", "strcat", "strcmp", "strerror", "time",
    "tolower", "toupper",
];

const CPP_LIBRARY: &[&str] = &[
    "std", "string", "vector", "map", "unordered_map", "set", "unordered_set", "min", "max",
];

const PREPROCESSOR_DIRECTIVES: &[&str] = &[
    "define", "undef", "include", "if", "ifdef", "ifndef", "else", "elif", "endif", "line",
    "error", "pragma", "version", "extension",
];

const GLSL_KEYWORDS: &[&str] = &[
    "attribute", "const", "uniform", "varying", "buffer", "shared", "coherent", "volatile",
    "restrict", "readonly", "writeonly", "layout", "centroid", "flat", "smooth", "noperspective",
    "patch", "sample", "break", "continue", "do", "for", "while", "switch", "case", "default",
    "if", "else", "subroutine", "in", "out", "inout", "float", "double", "int", "void", "bool",
    "true", "false", "invariant", "precise", "discard", "return", "mat2", "mat3", "mat4",
    "vec2", "vec3", "vec4", "ivec2", "ivec3", "ivec4", "bvec2", "bvec3", "bvec4", "uint",
    "uvec2", "uvec3", "uvec4", "dvec2", "dvec3", "dvec4", "lowp", "mediump", "highp",
    "precision", "sampler1D", "sampler2D", "sampler3D", "samplerCube", "struct",
];

const GLSL_FUNCTIONS: &[&str] = &[
    "radians", "degrees", "sin", "cos", "tan", "asin", "acos", "atan", "pow", "exp", "log",
    "exp2", "log2", "sqrt", "inversesqrt", "abs", "sign", "floor", "ceil", "fract", "mod", "min",
    "max", "clamp", "mix", "step", "smoothstep", "length", "distance", "dot", "cross",
    "normalize", "reflect", "refract", "texture", "texelFetch", "dFdx", "dFdy", "fwidth",
];

const HLSL_KEYWORDS: &[&str] = &[
    "AppendStructuredBuffer", "asm", "asm_fragment", "BlendState", "bool", "break", "Buffer",
    "ByteAddressBuffer", "case", "cbuffer", "centroid", "class", "column_major", "compile",
    "compile_fragment", "CompileShader", "const", "continue", "ComputeShader",
    "ConsumeStructuredBuffer", "default", "DepthStencilState", "DepthStencilView", "discard",
    "do", "double", "DomainShader", "dword", "else", "export", "extern", "false", "float", "for",
    "fxgroup", "GeometryShader", "groupshared", "half", "Hullshader", "if", "in", "inline",
    "inout", "InputPatch", "int", "interface", "line", "lineadj", "linear", "LineStream",
    "matrix", "min16float", "min10float", "min16int", "min12int", "min16uint", "namespace",
    "nointerpolation", "noperspective", "NULL", "out", "OutputPatch", "packoffset", "pass",
    "pixelfragment", "PixelShader", "point", "PointStream", "precise", "RasterizerState",
    "RenderTargetView", "return", "register", "row_major", "RWBuffer", "RWByteAddressBuffer",
    "RWStructuredBuffer", "RWTexture1D", "RWTexture1DArray", "RWTexture2D", "RWTexture2DArray",
    "RWTexture3D", "sample", "sampler", "SamplerState", "SamplerComparisonState", "shared",
    "snorm", "stateblock", "stateblock_state", "static", "string", "struct", "switch",
    "StructuredBuffer", "tbuffer", "technique", "technique10", "technique11", "texture",
    "Texture1D", "Texture1DArray", "Texture2D", "Texture2DArray", "Texture2DMS",
    "Texture2DMSArray", "Texture3D", "TextureCube", "TextureCubeArray", "true", "typedef",
    "triangle", "triangleadj", "TriangleStream", "uint", "uniform", "unorm", "unsigned", "vector",
    "vertexfragment", "VertexShader", "void", "volatile", "while",
];

/// Scalar types that also come as `T1`..`T4` vectors.
const HLSL_VECTOR_TYPES: &[&str] = &["bool", "double", "float", "int", "uint", "dword", "half"];

/// Scalar types that also come as `TRxC` matrices.
const HLSL_MATRIX_TYPES: &[&str] = &["float", "half"];

const HLSL_FUNCTIONS: &[&str] = &[
    "abort", "abs", "acos", "all", "AllMemoryBarrier", "AllMemoryBarrierWithGroupSync", "any",
    "asdouble", "asfloat", "asin", "asint", "asuint", "atan", "atan2", "ceil",
    "CheckAccessFullyMapped", "clamp", "clip", "cos", "cosh", "countbits", "cross",
    "D3DCOLORtoUBYTE4", "ddx", "ddx_coarse", "ddx_fine", "ddy", "ddy_coarse", "ddy_fine",
    "degrees", "determinant", "DeviceMemoryBarrier", "DeviceMemoryBarrierWithGroupSync",
    "distance", "dot", "dst", "errorf", "EvaluateAttributeAtCentroid",
    "EvaluateAttributeAtSample", "EvaluateAttributeSnapped", "exp", "exp2", "f16tof32",
    "f32tof16", "faceforward", "firstbithigh", "firstbitlow", "floor", "fma", "fmod", "frac",
    "frexp", "fwidth", "GetRenderTargetSampleCount", "GetRenderTargetSamplePosition",
    "GroupMemoryBarrier", "GroupMemoryBarrierWithGroupSync", "InterlockedAdd", "InterlockedAnd",
    "InterlockedCompareExchange", "InterlockedCompareStore", "InterlockedExchange",
    "InterlockedMax", "InterlockedMin", "InterlockedOr", "InterlockedXor", "isfinite", "isinf",
    "isnan", "ldexp", "length", "lerp", "lit", "log", "log10", "log2", "mad", "max", "min",
    "modf", "msad4", "mul", "noise", "normalize", "pow", "printf", "Process2DQuadTessFactorsAvg",
    "Process2DQuadTessFactorsMax", "Process2DQuadTessFactorsMin", "ProcessIsolineTessFactors",
    "ProcessQuadTessFactorsAvg", "ProcessQuadTessFactorsMax", "ProcessQuadTessFactorsMin",
    "ProcessTriTessFactorsAvg", "ProcessTriTessFactorsMax", "ProcessTriTessFactorsMin",
    "radians", "rcp", "reflect", "refract", "reversebits", "round", "rsqrt", "saturate", "sign",
    "sin", "sincos", "sinh", "smoothstep", "sqrt", "step", "tan", "tanh", "tex1D", "tex1Dbias",
    "tex1Dgrad", "tex1Dlod", "tex1Dproj", "tex2D", "tex2Dbias", "tex2Dgrad", "tex2Dlod",
    "tex2Dproj", "tex3D", "tex3Dbias", "tex3Dgrad", "tex3Dlod", "tex3Dproj", "texCUBE",
    "texCUBEbias", "texCUBEgrad", "texCUBElod", "texCUBEproj", "transpose", "trunc",
];

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

const LUA_LIBRARY: &[&str] = &[
    "assert", "collectgarbage", "dofile", "error", "getmetatable", "ipairs", "load", "next",
    "pairs", "pcall", "print", "rawequal", "rawlen", "rawget", "rawset", "select",
    "setmetatable", "tonumber", "tostring", "type", "xpcall", "_G", "_VERSION", "_ENV", "create",
    "resume", "running", "status", "wrap", "yield", "isyieldable", "lines", "open", "output",
    "read", "tmpfile", "write", "close", "flush", "seek", "setvbuf", "__gc", "__tostring", "abs",
    "acos", "asin", "atan", "ceil", "cos", "deg", "exp", "tointeger", "floor", "fmod", "ult",
    "log", "max", "min", "modf", "rad", "random", "randomseed", "sin", "sqrt", "tan", "cosh",
    "sinh", "tanh", "pow", "frexp", "ldexp", "log10", "pi", "huge", "maxinteger", "mininteger",
    "loadlib", "searchpath", "seeall", "preload", "cpath", "path", "searchers", "loaded",
    "module", "require", "clock", "date", "difftime", "execute", "exit", "getenv", "remove",
    "rename", "setlocale", "time", "tmpname", "byte", "char", "dump", "find", "format", "gmatch",
    "gsub", "len", "lower", "match", "rep", "reverse", "sub", "upper", "pack", "packsize",
    "unpack", "concat", "maxn", "insert", "move", "sort", "offset", "codepoint", "codes",
    "charpattern", "coroutine", "table", "io", "os", "string", "utf8", "bit32", "math",
    "package",
];

const C_STRING: &str = r#"L?"(\\.|[^"])*""#;
const FLOAT: &str = r"[+-]?([0-9]+([.][0-9]*)?|[.][0-9]+)([eE][+-]?[0-9]+)?[fF]?";
const INTEGER: &str = r"[+-]?[0-9]+[Uu]?[lL]?[lL]?";
const HEX: &str = r"0[xX][0-9a-fA-F]+[uU]?[lL]?[lL]?";
const IDENTIFIER: &str = r"[a-zA-Z_][a-zA-Z0-9_]*";
const PUNCTUATION: &str = r"[\[\]{}!%^&*()\-+=~|<>?/;,.]";

fn with_preprocessor(mut def: LanguageDefinition) -> LanguageDefinition {
    def.preproc_identifiers = PREPROCESSOR_DIRECTIVES
        .iter()
        .map(|name| (name.to_string(), Identifier::new("Preprocessor directive")))
        .collect();
    def
}

/// Block and line comments plus the rule list shared by the shading languages.
fn with_shader_rules(def: LanguageDefinition) -> LanguageDefinition {
    def.with_comments("/*", "*/", "//")
        .with_rule(r"[ \t]*#[ \t]*[a-zA-Z_]+", ColorClass::Preprocessor)
        .with_rule(C_STRING, ColorClass::String)
        .with_rule(r"'\\?[^']'", ColorClass::CharLiteral)
        .with_rule(FLOAT, ColorClass::Number)
        .with_rule(INTEGER, ColorClass::Number)
        .with_rule(r"0[0-7]+[Uu]?[lL]?[lL]?", ColorClass::Number)
        .with_rule(HEX, ColorClass::Number)
        .with_rule(IDENTIFIER, ColorClass::Identifier)
        .with_rule(PUNCTUATION, ColorClass::Punctuation)
}

impl LanguageDefinition {
    /// C, tokenized by [`tokenize::c_style`].
    pub fn c() -> Self {
        let def = LanguageDefinition::new("C")
            .with_keywords(C_KEYWORDS.iter().copied())
            .with_identifiers(C_FUNCTIONS.iter().copied(), BUILTIN_FUNCTION)
            .with_comments("/*", "*/", "//")
            .with_tokenizer(tokenize::c_style);
        with_preprocessor(def)
    }

    /// C++, tokenized by [`tokenize::c_style`].
    pub fn cpp() -> Self {
        let def = LanguageDefinition::new("C++")
            .with_keywords(CPP_KEYWORDS.iter().copied())
            .with_identifiers(
                C_FUNCTIONS.iter().chain(CPP_LIBRARY).copied(),
                BUILTIN_FUNCTION,
            )
            .with_comments("/*", "*/", "//")
            .with_tokenizer(tokenize::c_style);
        with_preprocessor(def)
    }

    /// GLSL, tokenized by an ordered rule list.
    pub fn glsl() -> Self {
        let def = LanguageDefinition::new("GLSL")
            .with_keywords(GLSL_KEYWORDS.iter().copied())
            .with_identifiers(GLSL_FUNCTIONS.iter().copied(), BUILTIN_FUNCTION);
        with_preprocessor(with_shader_rules(def))
    }

    /// HLSL, tokenized by the same rule list as GLSL.
    pub fn hlsl() -> Self {
        let vectors = HLSL_VECTOR_TYPES
            .iter()
            .flat_map(|ty| (1..=4).map(move |n| format!("{ty}{n}")));
        let matrices = HLSL_MATRIX_TYPES.iter().flat_map(|ty| {
            (1..=4).flat_map(move |rows| (1..=4).map(move |cols| format!("{ty}{rows}x{cols}")))
        });
        let sized: Vec<String> = vectors.chain(matrices).collect();

        let def = LanguageDefinition::new("HLSL")
            .with_keywords(HLSL_KEYWORDS.iter().copied())
            .with_keywords(sized.iter().map(String::as_str))
            .with_identifiers(HLSL_FUNCTIONS.iter().copied(), BUILTIN_FUNCTION);
        with_preprocessor(with_shader_rules(def))
    }

    /// Lua, tokenized by an ordered rule list. Auto-indentation is off.
    pub fn lua() -> Self {
        let mut def = LanguageDefinition::new("Lua")
            .with_keywords(LUA_KEYWORDS.iter().copied())
            .with_identifiers(LUA_LIBRARY.iter().copied(), BUILTIN_FUNCTION)
            .with_comments("--[[", "]]", "--")
            .with_rule(C_STRING, ColorClass::String)
            .with_rule(r"'[^']*'", ColorClass::String)
            .with_rule(HEX, ColorClass::Number)
            .with_rule(FLOAT, ColorClass::Number)
            .with_rule(INTEGER, ColorClass::Number)
            .with_rule(IDENTIFIER, ColorClass::Identifier)
            .with_rule(PUNCTUATION, ColorClass::Punctuation);
        def.auto_indentation = false;
        def
    }

    /// Look up a built-in language by name (`c`, `c++`/`cpp`, `glsl`, `hlsl`, `lua`), ignoring
    /// case.
    pub fn builtin(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "c" => Some(Self::c()),
            "c++" | "cpp" => Some(Self::cpp()),
            "glsl" => Some(Self::glsl()),
            "hlsl" => Some(Self::hlsl()),
            "lua" => Some(Self::lua()),
            _ => None,
        }
    }
}
