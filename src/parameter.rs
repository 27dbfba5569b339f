//! 命令参数的类型擦除边界
//!
//! 命令接口契约是非泛型的，而被包装的操作是强类型的。[`Parameter`] 在
//! 包装时捕获值的运行期类型名，使失配错误总能同时报告期望类型与实际
//! 类型；[`CommandInput`] 则回答"缺参（null）是否是该输入类型的合法取值"。
//!
use std::any::{Any, type_name};
use std::fmt;

/// 缺参时用于失配错误 `found` 字段的类型名
pub const ABSENT_TYPE_NAME: &str = "none";

/// 类型擦除后的命令参数
///
/// 包装任意 `Any + Send` 值，并记住包装时的静态类型名。
pub struct Parameter {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Parameter {
    pub fn new<P: Any + Send>(value: P) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<P>(),
        }
    }

    /// 包装时捕获的类型名
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<P: Any>(&self) -> bool {
        self.value.is::<P>()
    }

    /// 取回强类型值；失败时原样归还参数（类型名保持不变）
    pub fn downcast<P: Any>(self) -> Result<P, Self> {
        let type_name = self.type_name;
        match self.value.downcast::<P>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Self { value, type_name }),
        }
    }

    pub fn downcast_ref<P: Any>(&self) -> Option<&P> {
        self.value.downcast_ref()
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Parameter").field(&self.type_name).finish()
    }
}

/// 可作为命令输入的类型
///
/// `absent()` 给出"调用方未提供参数"时的合法取值：
/// - `Option<U>` 与 `()` 可以表达缺省，返回 `Some(..)`；
/// - 标量等非空类型保持缺省实现 `None`，缺参将被判定为类型失配。
///
/// 自定义输入类型按需实现该 trait（通常一行空实现即可）。
pub trait CommandInput: Any + Send {
    fn absent() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

impl<T: Any + Send> CommandInput for Option<T> {
    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl CommandInput for () {
    fn absent() -> Option<Self> {
        Some(())
    }
}

macro_rules! scalar_command_input {
    ($($ty:ty),+ $(,)?) => {
        $( impl CommandInput for $ty {} )+
    };
}

scalar_command_input!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
    &'static str,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_remembers_the_wrapped_type_name() {
        let p = Parameter::new(42_i32);
        assert_eq!(p.type_name(), "i32");
        assert!(p.is::<i32>());
        assert!(!p.is::<String>());
    }

    #[test]
    fn failed_downcast_returns_the_parameter_intact() {
        let p = Parameter::new("hello".to_string());

        let p = p.downcast::<i32>().expect_err("i32 downcast must fail");
        assert_eq!(p.type_name(), type_name::<String>());

        let s = p.downcast::<String>().expect("original type still works");
        assert_eq!(s, "hello");
    }

    #[test]
    fn option_and_unit_inputs_accept_absence() {
        assert_eq!(<Option<String>>::absent(), Some(None));
        assert_eq!(<()>::absent(), Some(()));
    }

    #[test]
    fn scalar_inputs_reject_absence() {
        assert_eq!(i32::absent(), None);
        assert_eq!(String::absent(), None);
        assert_eq!(bool::absent(), None);
    }
}
