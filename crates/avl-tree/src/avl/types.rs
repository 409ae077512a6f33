use crate::types::{HeightNode, Node};

/// Tree node: caller data, child links and cached subtree height.
#[derive(Clone, Debug)]
pub struct AvlNode<T> {
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub data: T,
    /// Subtree height; `0` for a leaf.
    pub height: i32,
}

impl<T> AvlNode<T> {
    pub fn new(data: T) -> Self {
        Self {
            l: None,
            r: None,
            data,
            height: 0,
        }
    }
}

impl<T> Node for AvlNode<T> {
    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<T> HeightNode for AvlNode<T> {
    fn height(&self) -> i32 {
        self.height
    }

    fn set_height(&mut self, height: i32) {
        self.height = height;
    }
}
